use crate::refs::{ObjectReferences, RefType};
use chrono::{DateTime, Datelike, FixedOffset, Local, Timelike};
use pdf_writer::{Date as PDate, Pdf, TextStr};

/// The document information dictionary of a badge run
#[derive(Default, Debug, Clone, PartialEq)]
pub struct Info {
    pub title: Option<String>,
    pub subject: Option<String>,
    pub keywords: Vec<String>,
}

impl Info {
    pub fn new() -> Info {
        Info::default()
    }

    /// Metadata describing a finished run
    pub fn for_run(badges: usize, attendees: usize, sheets: usize) -> Info {
        Info::new()
            .with_title("Badges")
            .with_subject(format!(
                "{badges} badges for {attendees} attendees on {sheets} sheets"
            ))
            .with_keyword("badges")
            .with_keyword("print")
    }

    pub fn with_title<S: Into<String>>(mut self, title: S) -> Info {
        self.title = Some(title.into());
        self
    }

    pub fn with_subject<S: Into<String>>(mut self, subject: S) -> Info {
        self.subject = Some(subject.into());
        self
    }

    pub fn with_keyword<S: Into<String>>(mut self, keyword: S) -> Info {
        self.keywords.push(keyword.into());
        self
    }

    pub(crate) fn write(&self, refs: &mut ObjectReferences, writer: &mut Pdf) {
        let id = refs.gen(RefType::Info);
        let mut info = writer.document_info(id);

        if let Some(title) = &self.title {
            info.title(TextStr(title));
        }
        if let Some(subject) = &self.subject {
            info.subject(TextStr(subject));
        }
        let keywords = self.keywords.join(", ");
        if !keywords.is_empty() {
            info.keywords(TextStr(&keywords));
        }
        info.creator(TextStr(concat!(
            env!("CARGO_PKG_NAME"),
            " v",
            env!("CARGO_PKG_VERSION")
        )));
        info.creation_date(pdf_date(Local::now().fixed_offset()));
    }
}

/// A timestamp as a PDF date, keeping its UTC offset
fn pdf_date(at: DateTime<FixedOffset>) -> PDate {
    let offset = at.offset().local_minus_utc();
    PDate::new(at.year() as u16)
        .month(at.month() as u8)
        .day(at.day() as u8)
        .hour(at.hour() as u8)
        .minute(at.minute() as u8)
        .second(at.second() as u8)
        .utc_offset_hour((offset / 3600) as i8)
        .utc_offset_minute(((offset % 3600) / 60).unsigned_abs() as u8)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn run_metadata() {
        let info = Info::for_run(14, 7, 3);
        assert_eq!(info.title.as_deref(), Some("Badges"));
        assert_eq!(
            info.subject.as_deref(),
            Some("14 badges for 7 attendees on 3 sheets")
        );
        assert_eq!(info.keywords, ["badges", "print"]);
    }

    #[test]
    fn run_metadata_is_written() {
        let mut pdf = Pdf::new();
        let mut refs = ObjectReferences::new();
        Info::for_run(4, 2, 1).write(&mut refs, &mut pdf);
        let bytes = pdf.finish();
        let text = String::from_utf8_lossy(&bytes);
        assert!(text.contains("(4 badges for 2 attendees on 1 sheets)"), "{text}");
        assert!(text.contains("(badges, print)"), "{text}");
        assert!(!text.contains("/Author"), "{text}");
    }

    #[test]
    fn dates_keep_negative_offsets() {
        let at = DateTime::parse_from_rfc3339("2026-06-01T09:30:00-04:30").expect("valid date");
        let mut pdf = Pdf::new();
        let mut refs = ObjectReferences::new();
        let id = refs.gen(RefType::Info);
        pdf.document_info(id).creation_date(pdf_date(at));
        let bytes = pdf.finish();
        let text = String::from_utf8_lossy(&bytes);
        assert!(text.contains("D:20260601093000-04"), "{text}");
    }
}
