//! File-backed report sink
//!
//! Both outputs are opened once when the crawl starts and rewritten in
//! place after every iteration, so the files on disk always hold the latest
//! complete snapshot.

use crate::config::OutputConfig;
use crate::output::report::Report;
use crate::output::traits::{OutputError, OutputResult, ReportSink};
use crate::state::PageRecord;
use std::fs::File;
use std::io::{Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

/// An open file whose contents are replaced wholesale on each write
#[derive(Debug)]
struct OverwriteFile {
    path: PathBuf,
    file: File,
}

impl OverwriteFile {
    fn create(path: &Path) -> OutputResult<Self> {
        let file = File::create(path).map_err(|source| OutputError::Open {
            path: path.display().to_string(),
            source,
        })?;

        Ok(Self {
            path: path.to_path_buf(),
            file,
        })
    }

    fn replace(&mut self, contents: &[u8]) -> OutputResult<()> {
        self.try_replace(contents)
            .map_err(|source| OutputError::Write {
                path: self.path.display().to_string(),
                source,
            })
    }

    fn try_replace(&mut self, contents: &[u8]) -> std::io::Result<()> {
        self.file.set_len(0)?;
        self.file.seek(SeekFrom::Start(0))?;
        self.file.write_all(contents)?;
        self.file.flush()
    }
}

/// Writes the markdown report and, optionally, a Title,URL CSV
#[derive(Debug)]
pub struct FileSink {
    report: OverwriteFile,
    titles: Option<OverwriteFile>,
}

impl FileSink {
    /// Opens (and truncates) the output files
    ///
    /// # Arguments
    ///
    /// * `report_path` - Where the markdown report is written
    /// * `titles_path` - Where the titles CSV is written, if wanted
    ///
    /// # Returns
    ///
    /// * `Ok(FileSink)` - Both files are open for writing
    /// * `Err(OutputError::Open)` - A file could not be created
    pub fn create(report_path: &Path, titles_path: Option<&Path>) -> OutputResult<Self> {
        let report = OverwriteFile::create(report_path)?;
        let titles = titles_path.map(OverwriteFile::create).transpose()?;
        Ok(Self { report, titles })
    }

    /// Opens the outputs named in the configuration
    pub fn from_config(config: &OutputConfig) -> OutputResult<Self> {
        Self::create(
            Path::new(&config.report_path),
            config.titles_path.as_deref().map(Path::new),
        )
    }
}

impl ReportSink for FileSink {
    fn publish(&mut self, report: &Report, pages: &[PageRecord]) -> OutputResult<()> {
        self.report.replace(report.to_markdown().as_bytes())?;

        if let Some(titles) = &mut self.titles {
            let csv = render_titles_csv(pages)?;
            titles.replace(csv.as_bytes())?;
        }

        Ok(())
    }
}

/// Formats visited pages as a `Title,URL` CSV, in visit order
pub fn render_titles_csv(pages: &[PageRecord]) -> OutputResult<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(["Title", "URL"])?;

    for page in pages {
        writer.write_record([page.title.as_str(), page.target.as_str()])?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| OutputError::Format(e.to_string()))?;
    String::from_utf8(bytes).map_err(|e| OutputError::Format(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{Bucket, CategoryBuckets, Frontier};
    use crate::url::normalize_url;
    use tempfile::TempDir;
    use url::Url;

    fn page(path: &str, title: &str) -> PageRecord {
        PageRecord {
            target: normalize_url(&Url::parse(&format!("https://site.example{}", path)).unwrap()),
            title: title.to_string(),
            bucket: Bucket::Unknown,
        }
    }

    fn report(crawled: usize) -> Report {
        let mut buckets = CategoryBuckets::new(Vec::<String>::new());
        for i in 0..crawled {
            buckets.push(Bucket::Unknown, page(&format!("/p{}", i), "").target);
        }
        Report::build(&buckets, &Frontier::default())
    }

    #[test]
    fn test_titles_csv() {
        let csv = render_titles_csv(&[page("/home", "Home"), page("/api", "API, v2")]).unwrap();
        assert_eq!(
            csv,
            "Title,URL\nHome,https://site.example/home\n\"API, v2\",https://site.example/api\n"
        );
    }

    #[test]
    fn test_titles_csv_empty() {
        assert_eq!(render_titles_csv(&[]).unwrap(), "Title,URL\n");
    }

    #[test]
    fn test_publish_overwrites() {
        let dir = TempDir::new().unwrap();
        let report_path = dir.path().join("report.md");
        let titles_path = dir.path().join("titles.csv");

        let mut sink = FileSink::create(&report_path, Some(&titles_path)).unwrap();

        sink.publish(&report(3), &[page("/a", "A"), page("/b", "B")])
            .unwrap();
        sink.publish(&report(1), &[page("/a", "A")]).unwrap();

        let written = std::fs::read_to_string(&report_path).unwrap();
        assert_eq!(written, report(1).to_markdown());
        assert!(written.contains("- **Crawled**: 1\n"));

        let titles = std::fs::read_to_string(&titles_path).unwrap();
        assert_eq!(titles, "Title,URL\nA,https://site.example/a\n");
    }

    #[test]
    fn test_without_titles_file() {
        let dir = TempDir::new().unwrap();
        let report_path = dir.path().join("report.md");

        let mut sink = FileSink::create(&report_path, None).unwrap();
        sink.publish(&report(0), &[]).unwrap();

        assert!(report_path.exists());
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[test]
    fn test_create_in_missing_directory() {
        let result = FileSink::create(Path::new("/nonexistent/dir/report.md"), None);
        assert!(matches!(result.unwrap_err(), OutputError::Open { .. }));
    }

    #[test]
    fn test_from_config() {
        let dir = TempDir::new().unwrap();
        let config = OutputConfig {
            report_path: dir.path().join("r.md").display().to_string(),
            titles_path: None,
        };
        assert!(FileSink::from_config(&config).is_ok());
    }
}
