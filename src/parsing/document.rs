//! Document text acquisition.
//!
//! Pages are read one at a time, in order, with a progress event after each
//! page. The extraction is driven by iterating [`PageExtraction`]; dropping
//! the iterator cancels it. The first failing page aborts the whole run.

use std::fs;
use std::path::Path;

use crate::config::Config;
use crate::error::{Result, StudyError};

/// Something that can hand out the text of its pages one by one.
pub trait PageSource {
    fn page_count(&self) -> Result<usize>;
    fn page_text(&mut self, page_index: usize) -> Result<String>;
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExtractionProgress {
    /// 1-based number of the page just completed.
    pub page: usize,
    pub total: usize,
    pub percent: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ExtractionEvent {
    Progress(ExtractionProgress),
    Finished(String),
}

pub struct PageExtraction<'a, S: PageSource + ?Sized> {
    source: &'a mut S,
    total: Option<usize>,
    next_page: usize,
    text: String,
    done: bool,
}

impl<'a, S: PageSource + ?Sized> PageExtraction<'a, S> {
    pub fn new(source: &'a mut S) -> Self {
        Self {
            source,
            total: None,
            next_page: 0,
            text: String::new(),
            done: false,
        }
    }

    fn fail(&mut self, err: StudyError) -> Option<Result<ExtractionEvent>> {
        self.done = true;
        let err = match err {
            StudyError::Extraction(_) | StudyError::NoPages => err,
            other => StudyError::Extraction(other.to_string()),
        };
        Some(Err(err))
    }
}

impl<S: PageSource + ?Sized> Iterator for PageExtraction<'_, S> {
    type Item = Result<ExtractionEvent>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        let total = match self.total {
            Some(total) => total,
            None => match self.source.page_count() {
                Ok(0) => return self.fail(StudyError::NoPages),
                Ok(total) => {
                    self.total = Some(total);
                    total
                }
                Err(e) => return self.fail(e),
            },
        };

        if self.next_page == total {
            self.done = true;
            return Some(Ok(ExtractionEvent::Finished(std::mem::take(&mut self.text))));
        }

        match self.source.page_text(self.next_page) {
            Ok(page_text) => {
                self.text.push_str(&page_text);
                self.text.push_str("\n\n");
                self.next_page += 1;
                Some(Ok(ExtractionEvent::Progress(ExtractionProgress {
                    page: self.next_page,
                    total,
                    percent: self.next_page as f32 / total as f32 * 100.0,
                })))
            }
            Err(e) => self.fail(e),
        }
    }
}

/// Runs a [`PageExtraction`] to completion.
pub fn extract_text<S, F>(source: &mut S, mut on_progress: F) -> Result<String>
where
    S: PageSource + ?Sized,
    F: FnMut(ExtractionProgress),
{
    for event in PageExtraction::new(source) {
        match event? {
            ExtractionEvent::Progress(progress) => on_progress(progress),
            ExtractionEvent::Finished(text) => return Ok(text),
        }
    }
    Err(StudyError::Extraction("extraction ended without a result".to_string()))
}

/// Plain text already split into pages.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PagedText {
    pub pages: Vec<String>,
}

impl PagedText {
    pub fn split(text: &str, separator: &str) -> Self {
        let mut pages: Vec<String> = text.split(separator).map(String::from).collect();
        // pdftotext terminates the last page with a separator too
        if pages.len() > 1 && pages.last().is_some_and(|p| p.trim().is_empty()) {
            pages.pop();
        }
        PagedText { pages }
    }
}

impl PageSource for PagedText {
    fn page_count(&self) -> Result<usize> {
        Ok(self.pages.len())
    }

    fn page_text(&mut self, page_index: usize) -> Result<String> {
        self.pages
            .get(page_index)
            .cloned()
            .ok_or_else(|| StudyError::Extraction(format!("page {} out of range", page_index + 1)))
    }
}

/// Reads a text document from disk, enforcing the configured size limit.
pub fn load_document(file_path: &Path, config: &Config) -> Result<PagedText> {
    let size = fs::metadata(file_path)?.len();
    if size > config.max_upload_bytes {
        return Err(StudyError::FileTooLarge {
            size,
            limit: config.max_upload_bytes,
        });
    }
    let contents = fs::read_to_string(file_path)?;
    log::debug!("Loaded {} ({} bytes)", file_path.display(), size);
    Ok(PagedText::split(&contents, &config.page_separator))
}
