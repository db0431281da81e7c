//! 浏览会话：单线程事件驱动的状态壳。
//! 持有导航器、查询串、虚拟化窗口、复制确认标记与图片预览状态；
//! 清单未就绪前停在 Loading，加载完成回调带票据，过期回调直接丢弃。

use std::collections::HashMap;
use std::ops::Range;
use std::time::{Duration, Instant};

use qbox_assets_common::AssetError;
use qbox_assets_domain::{DisplayItem, Manifest};

use crate::keys::Key;
use crate::listing::process_nodes;
use crate::navigation::Navigator;
use crate::window::ListWindow;

/// 复制确认标记的存活时长
pub const COPY_FEEDBACK_TTL: Duration = Duration::from_secs(2);

#[derive(Debug, Clone, PartialEq)]
pub struct PreviewImage {
    pub path: String,
    pub name: String,
}

pub struct ExplorerSession {
    nav: Option<Navigator>,
    query: String,
    window: ListWindow,
    /// 目标 id → 标记时刻；同一 id 的新复制动作覆盖旧标记，各 id 互不影响
    copied: HashMap<String, Instant>,
    preview: Option<PreviewImage>,
    load_epoch: u64,
}

impl ExplorerSession {
    pub fn new(viewport: usize, overscan: usize) -> Self {
        Self {
            nav: None,
            query: String::new(),
            window: ListWindow::new(viewport, overscan),
            copied: HashMap::new(),
            preview: None,
            load_epoch: 0,
        }
    }

    // ---- 清单加载 ----

    /// 发起一次加载，返回票据；旧票据的完成回调会被忽略
    pub fn begin_load(&mut self) -> u64 {
        self.load_epoch += 1;
        self.load_epoch
    }

    pub fn finish_load(&mut self, ticket: u64, result: Result<Manifest, AssetError>) {
        if ticket != self.load_epoch {
            log::debug!("ignoring stale manifest load (ticket {ticket})");
            return;
        }
        match result {
            Ok(manifest) => {
                self.nav = Some(Navigator::new(manifest));
                self.reset_folder_view();
            }
            Err(e) => {
                // 保持 Loading，没有重试
                log::error!("failed to load manifest: {e}");
            }
        }
    }

    pub fn is_loading(&self) -> bool {
        self.nav.is_none()
    }

    /// 已加载但当前文件夹（经过滤）没有任何条目：空态展示，区别于 Loading
    pub fn is_empty(&self) -> bool {
        !self.is_loading() && self.display_list().is_empty()
    }

    // ---- 导航（每次转移都重置查询与窗口偏移） ----

    pub fn path(&self) -> &[String] {
        match &self.nav {
            Some(nav) => nav.path(),
            None => &[],
        }
    }

    pub fn navigate_root(&mut self) {
        if let Some(nav) = &mut self.nav {
            nav.navigate_root();
        }
        self.reset_folder_view();
    }

    /// 目标不存在或不是目录时状态不变，查询与窗口也不重置
    pub fn navigate_into(&mut self, folder_name: &str) {
        if let Some(nav) = &mut self.nav {
            if nav.navigate_into(folder_name) {
                self.reset_folder_view();
            }
        }
    }

    pub fn navigate_to_breadcrumb(&mut self, index: usize) {
        if let Some(nav) = &mut self.nav {
            nav.navigate_to_breadcrumb(index);
        }
        self.reset_folder_view();
    }

    fn reset_folder_view(&mut self) {
        self.query.clear();
        self.window.reset();
        self.sync_window_total();
    }

    // ---- 查询与列表 ----

    pub fn query(&self) -> &str {
        &self.query
    }

    /// 查询串属于「当前文件夹内容」，编辑后窗口回到顶部
    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
        self.window.reset();
        self.sync_window_total();
    }

    /// 当前文件夹的完整展示列表，每次调用重新计算
    pub fn display_list(&self) -> Vec<DisplayItem> {
        match &self.nav {
            Some(nav) => process_nodes(nav.current_nodes(), &self.query),
            None => Vec::new(),
        }
    }

    fn sync_window_total(&mut self) {
        let total = self.display_list().len();
        self.window.set_total(total);
    }

    // ---- 虚拟化窗口 ----

    pub fn scroll_to(&mut self, first_visible: usize) {
        self.window.scroll_to(first_visible);
    }

    pub fn set_viewport(&mut self, viewport: usize) {
        self.window.set_viewport(viewport);
    }

    pub fn visible_range(&self) -> Range<usize> {
        self.window.range()
    }

    /// 物化窗口内的条目
    pub fn visible_items(&self) -> Vec<DisplayItem> {
        let list = self.display_list();
        let range = self.visible_range();
        let end = range.end.min(list.len());
        let start = range.start.min(end);
        list[start..end].to_vec()
    }

    // ---- 复制确认标记 ----

    /// 同一 id 重复复制会重置计时；顺手清掉已过期的标记，不积累
    pub fn mark_copied(&mut self, id: impl Into<String>, now: Instant) {
        self.copied
            .retain(|_, at| now.duration_since(*at) < COPY_FEEDBACK_TTL);
        self.copied.insert(id.into(), now);
    }

    pub fn is_copied(&self, id: &str, now: Instant) -> bool {
        match self.copied.get(id) {
            Some(at) => now.duration_since(*at) < COPY_FEEDBACK_TTL,
            None => false,
        }
    }

    // ---- 图片预览 ----

    /// 只有图片文件会打开预览
    pub fn open_preview(&mut self, item: &DisplayItem) -> bool {
        if let DisplayItem::File {
            name,
            path,
            is_image: true,
        } = item
        {
            self.preview = Some(PreviewImage {
                path: path.clone(),
                name: name.clone(),
            });
            true
        } else {
            false
        }
    }

    pub fn preview(&self) -> Option<&PreviewImage> {
        self.preview.as_ref()
    }

    /// 背景点击与关闭按钮走同一条路
    pub fn close_preview(&mut self) {
        self.preview = None;
    }

    /// Escape 关闭预览；订阅期间无论预览是否打开都会收到按键
    pub fn handle_key(&mut self, key: Key) {
        if key == Key::Escape {
            self.close_preview();
        }
    }
}
