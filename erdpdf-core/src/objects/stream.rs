use crate::error::Result;
use crate::objects::{Dictionary, Object};

/// A stream object under construction: a dictionary plus raw bytes.
///
/// `/Length` is kept in sync with the data whenever the data is replaced
/// through this type.
#[derive(Debug, Clone)]
pub struct Stream {
    dictionary: Dictionary,
    data: Vec<u8>,
}

impl Stream {
    pub fn new(data: Vec<u8>) -> Self {
        Self::with_dictionary(Dictionary::new(), data)
    }

    pub fn with_dictionary(mut dictionary: Dictionary, data: Vec<u8>) -> Self {
        dictionary.set("Length", data.len() as i64);
        Self { dictionary, data }
    }

    pub fn dictionary(&self) -> &Dictionary {
        &self.dictionary
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn set_filter(&mut self, filter: &str) {
        self.dictionary.set("Filter", Object::name(filter));
    }

    /// Replaces the data with its zlib encoding and marks the stream
    /// `/FlateDecode`. Without the `compression` feature the stream is
    /// left untouched.
    pub fn compress_flate(&mut self) -> Result<()> {
        #[cfg(feature = "compression")]
        {
            self.data = crate::compression::compress(&self.data)?;
            self.dictionary.set("Length", self.data.len() as i64);
            self.set_filter("FlateDecode");
        }
        Ok(())
    }

    pub fn into_object(self) -> Object {
        Object::Stream(self.dictionary, self.data)
    }
}
