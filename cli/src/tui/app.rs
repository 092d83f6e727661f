use gymreport_core::model::report::DocumentPage;
use gymreport_core::Document;

pub struct App {
    pub document: Document,
    pub current_page: usize,
}

impl App {
    pub fn new(document: Document) -> App {
        App {
            document,
            current_page: 0,
        }
    }

    pub fn next_page(&mut self) {
        if self.current_page + 1 < self.document.pages.len() {
            self.current_page += 1;
        }
    }

    pub fn previous_page(&mut self) {
        if self.current_page > 0 {
            self.current_page -= 1;
        }
    }

    pub fn page(&self) -> Option<&DocumentPage> {
        self.document.pages.get(self.current_page)
    }

    pub fn has_next(&self) -> bool {
        self.current_page + 1 < self.document.pages.len()
    }

    pub fn has_previous(&self) -> bool {
        self.current_page > 0
    }
}
