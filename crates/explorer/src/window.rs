//! 列表虚拟化：只物化可视窗口加上前后各一段 overscan 的索引区间，
//! 与具体 UI 框架无关。滚动、改尺寸、换文件夹时重算。

use std::ops::Range;

#[derive(Debug, Clone)]
pub struct ListWindow {
    total: usize,
    offset: usize,
    viewport: usize,
    overscan: usize,
}

impl ListWindow {
    pub fn new(viewport: usize, overscan: usize) -> Self {
        Self {
            total: 0,
            offset: 0,
            viewport,
            overscan,
        }
    }

    pub fn total(&self) -> usize {
        self.total
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    /// 列表长度变化（过滤、导航）时同步，越界的偏移被拉回
    pub fn set_total(&mut self, total: usize) {
        self.total = total;
        self.offset = self.offset.min(total.saturating_sub(1));
        if total == 0 {
            self.offset = 0;
        }
    }

    pub fn scroll_to(&mut self, first_visible: usize) {
        self.offset = first_visible.min(self.total.saturating_sub(1));
        if self.total == 0 {
            self.offset = 0;
        }
    }

    /// 可视行数变化（窗口 resize）
    pub fn set_viewport(&mut self, viewport: usize) {
        self.viewport = viewport;
    }

    pub fn reset(&mut self) {
        self.offset = 0;
    }

    /// 需要物化的索引区间：可视窗口 ± overscan，夹在 0..total 内
    pub fn range(&self) -> Range<usize> {
        let start = self.offset.saturating_sub(self.overscan);
        let end = (self.offset + self.viewport + self.overscan).min(self.total);
        start..end
    }

    pub fn is_materialized(&self, index: usize) -> bool {
        self.range().contains(&index)
    }
}
