use std::fs::File;
use std::io::{BufRead, BufReader, Lines};
use std::path::Path;

use crate::error::{Result, SynthError};
use crate::genotypes::Genotype;

/// Index of the FORMAT column, which receives the genotype call.
pub const FORMAT_FIELD: usize = 8;

const BLOCK_MARKER: &str = "BLOCK:";

/// One data line of the site template, split on tabs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateRecord {
    /// 1-based line number in the template file.
    pub line: usize,
    fields: Vec<String>,
}

impl TemplateRecord {
    pub fn parse(line_no: usize, line: &str) -> Result<Self> {
        let fields: Vec<String> = line.trim_end().split('\t').map(String::from).collect();
        if fields.len() <= FORMAT_FIELD {
            return Err(SynthError::MalformedRecord {
                line: line_no,
                found: fields.len(),
            });
        }
        Ok(TemplateRecord {
            line: line_no,
            fields,
        })
    }

    pub fn fields(&self) -> &[String] {
        &self.fields
    }

    /// Render the record with the FORMAT column replaced by `GT` and the call.
    pub fn with_genotype(&self, genotype: Genotype) -> String {
        let format = format!("GT\t{}", genotype);
        let mut fields: Vec<&str> = self.fields.iter().map(String::as_str).collect();
        fields[FORMAT_FIELD] = &format;
        fields.join("\t")
    }
}

/// Header lines and m3vcf block markers carry no site. Everything else,
/// blank lines included, must parse as a record.
fn is_record_line(line: &str) -> bool {
    !(line.starts_with('#') || line.contains(BLOCK_MARKER))
}

/// Streams `TemplateRecord`s out of a template, skipping lines that carry no site.
pub struct TemplateReader<R> {
    lines: Lines<R>,
    line_no: usize,
}

impl<R: BufRead> TemplateReader<R> {
    pub fn new(reader: R) -> Self {
        TemplateReader {
            lines: reader.lines(),
            line_no: 0,
        }
    }
}

impl TemplateReader<BufReader<File>> {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| SynthError::open(path, e))?;
        Ok(TemplateReader::new(BufReader::new(file)))
    }
}

impl<R: BufRead> Iterator for TemplateReader<R> {
    type Item = Result<TemplateRecord>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let line = match self.lines.next()? {
                Ok(line) => line,
                Err(e) => return Some(Err(e.into())),
            };
            self.line_no += 1;
            if is_record_line(&line) {
                return Some(TemplateRecord::parse(self.line_no, &line));
            }
        }
    }
}

/// Number of records in the template at `path`. Every record is parsed, so a
/// malformed template fails here.
pub fn count_records<P: AsRef<Path>>(path: P) -> Result<usize> {
    TemplateReader::from_path(path)?.try_fold(0, |n, record| record.map(|_| n + 1))
}
