use super::*;

impl<R: GridRecord> RecordGrid<R> {
    /// Rows per page; `None` or zero turns paging off
    pub fn set_page_size(&mut self, size: Option<usize>) {
        self.page_size = size.filter(|size| *size > 0);
        self.page = 0;
    }

    pub fn page_size(&self) -> Option<usize> {
        self.page_size
    }

    /// Go to page `page`, clamped to the last page
    pub fn set_page(&mut self, page: usize) {
        let count = self.page_count();
        self.page = page.min(count - 1);
    }

    /// Current page index, clamped to the visible rows
    pub fn current_page(&self) -> usize {
        self.page.min(self.page_count() - 1)
    }

    /// Number of pages over the visible rows, at least 1
    pub fn page_count(&self) -> usize {
        pages_for(self.visible_count(), self.page_size)
    }

    /// Visible rows of the current page
    pub fn page_rows(&self) -> Vec<&R> {
        let visible = self.visible_indices();
        let page = self.page_info(visible.len());
        self.page_slice(&visible, &page)
            .iter()
            .map(|ix| &self.records[*ix])
            .collect()
    }

    pub(super) fn page_info(&self, visible: usize) -> PageInfo {
        let count = pages_for(visible, self.page_size);
        PageInfo {
            index: self.page.min(count - 1),
            count,
            size: self.page_size,
        }
    }

    pub(super) fn page_slice<'a>(&self, visible: &'a [usize], page: &PageInfo) -> &'a [usize] {
        match page.size {
            None => visible,
            Some(size) => {
                let start = (page.index * size).min(visible.len());
                let end = (start + size).min(visible.len());
                &visible[start..end]
            }
        }
    }
}

fn pages_for(rows: usize, size: Option<usize>) -> usize {
    match size {
        Some(size) if size > 0 => rows.div_ceil(size).max(1),
        _ => 1,
    }
}
