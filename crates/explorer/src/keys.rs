//! 按键订阅：挂载时注册、卸载时保证注销的作用域订阅。
//! 订阅句柄一旦 drop，路由器在下次分发前将其剪掉，不会再触达已销毁的状态。

use std::cell::RefCell;
use std::rc::{Rc, Weak};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Escape,
    Char(char),
}

type Handler = Rc<RefCell<dyn FnMut(Key)>>;

#[derive(Default)]
pub struct KeyRouter {
    handlers: RefCell<Vec<Weak<RefCell<dyn FnMut(Key)>>>>,
}

/// 订阅守卫：持有回调的唯一强引用，drop 即注销
pub struct KeySubscription {
    _handler: Handler,
}

impl KeyRouter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe<F: FnMut(Key) + 'static>(&self, callback: F) -> KeySubscription {
        let handler: Handler = Rc::new(RefCell::new(callback));
        self.handlers.borrow_mut().push(Rc::downgrade(&handler));
        KeySubscription { _handler: handler }
    }

    /// 分发前先剪掉失效订阅；回调在借用释放后调用，允许回调里再订阅
    pub fn dispatch(&self, key: Key) {
        let live: Vec<Handler> = {
            let mut handlers = self.handlers.borrow_mut();
            handlers.retain(|weak| weak.strong_count() > 0);
            handlers.iter().filter_map(Weak::upgrade).collect()
        };
        for handler in live {
            (&mut *handler.borrow_mut())(key);
        }
    }

    /// 存活的订阅数（剪掉失效项之后）
    pub fn active_count(&self) -> usize {
        let mut handlers = self.handlers.borrow_mut();
        handlers.retain(|weak| weak.strong_count() > 0);
        handlers.len()
    }
}
