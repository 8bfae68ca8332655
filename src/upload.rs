use crate::error::Result;
use crate::options::RequestOptions;
use crate::template::QueryArgs;
use chrono::{Datelike, NaiveDate};
use std::fmt;
use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

/// Progress callback, called with the number of bytes handed to the
/// transport by each read
pub type UploadProgressFn = Box<dyn Fn(u64) + Send + Sync>;

/// Upper bound on the buffer reserved up front from a declared length
const PREALLOC_LIMIT: usize = 8 * 1024 * 1024;

/// Content type used when the caller does not give one
pub const OCTET_STREAM: &str = "application/octet-stream";

/// Opaque upload body. The bytes are sent exactly as read.
pub struct UploadStream {
    reader: Box<dyn Read + Send>,
    len: Option<u64>,
    content_type: String,
}

impl UploadStream {
    /// Stream of unknown length, sent chunked
    pub fn from_reader<R: Read + Send + 'static>(reader: R) -> Self {
        UploadStream {
            reader: Box::new(reader),
            len: None,
            content_type: OCTET_STREAM.to_string(),
        }
    }

    /// In-memory upload
    pub fn from_bytes(bytes: impl Into<Vec<u8>>) -> Self {
        let bytes = bytes.into();
        let len = bytes.len() as u64;
        UploadStream::from_reader(io::Cursor::new(bytes)).with_len(len)
    }

    /// Upload the remaining content of an open file
    pub fn from_file(file: File) -> Result<Self> {
        let len = file.metadata()?.len();
        Ok(UploadStream::from_reader(file).with_len(len))
    }

    /// Open and upload the file at `path`
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        UploadStream::from_file(File::open(path)?)
    }

    /// Declare the exact number of bytes the reader yields
    pub fn with_len(mut self, len: u64) -> Self {
        self.len = Some(len);
        self
    }

    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = content_type.into();
        self
    }

    /// Report bytes as the transport consumes the stream
    pub fn with_progress(mut self, progress: UploadProgressFn) -> Self {
        self.reader = Box::new(ProgressReader {
            inner: self.reader,
            progress,
        });
        self
    }

    pub fn len(&self) -> Option<u64> {
        self.len
    }

    pub fn content_type(&self) -> &str {
        &self.content_type
    }

    /// Reader and declared length, for transports that stream
    pub fn into_parts(self) -> (Box<dyn Read + Send>, Option<u64>) {
        (self.reader, self.len)
    }

    /// Drain the stream, for transports that need the whole body
    pub fn into_bytes(mut self) -> io::Result<Vec<u8>> {
        let declared = self
            .len
            .and_then(|len| usize::try_from(len).ok())
            .unwrap_or(0);
        let mut buffer = Vec::with_capacity(declared.min(PREALLOC_LIMIT));
        self.reader.read_to_end(&mut buffer)?;
        Ok(buffer)
    }
}

impl fmt::Debug for UploadStream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UploadStream")
            .field("len", &self.len)
            .field("content_type", &self.content_type)
            .finish_non_exhaustive()
    }
}

struct ProgressReader<R> {
    inner: R,
    progress: UploadProgressFn,
}

impl<R: Read> Read for ProgressReader<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let n = self.inner.read(buf)?;
        if n > 0 {
            (self.progress)(n as u64);
        }
        Ok(n)
    }
}

/// Query parameters of a new bitstream.
///
/// The embargo date is sent as separate `year`, `month` and `day` values.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BitstreamUpload {
    pub name: Option<String>,
    pub description: Option<String>,
    /// Group granted read access once the embargo ends
    pub group_id: Option<i64>,
    pub embargo: Option<NaiveDate>,
    pub options: RequestOptions,
}

impl BitstreamUpload {
    pub fn new(name: impl Into<String>) -> Self {
        BitstreamUpload {
            name: Some(name.into()),
            ..Default::default()
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_group(mut self, group_id: i64) -> Self {
        self.group_id = Some(group_id);
        self
    }

    pub fn with_embargo(mut self, until: NaiveDate) -> Self {
        self.embargo = Some(until);
        self
    }

    pub fn with_options(mut self, options: RequestOptions) -> Self {
        self.options = options;
        self
    }
}

impl QueryArgs for BitstreamUpload {
    fn query_value(&self, name: &str) -> Option<String> {
        match name {
            "name" => self.name.clone(),
            "description" => self.description.clone(),
            "groupId" => self.group_id.map(|v| v.to_string()),
            "year" => self.embargo.map(|d| d.year().to_string()),
            "month" => self.embargo.map(|d| d.month().to_string()),
            "day" => self.embargo.map(|d| d.day().to_string()),
            other => self.options.query_value(other),
        }
    }
}
