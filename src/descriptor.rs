//! Extraction of the declared URI from tag library descriptors

use std::io::Read;

use crate::error::{Error, Result};
use crate::xml;

/// Extracts the single declared identifier from a descriptor stream.
pub trait DescriptorParser: Send + Sync {
    /// Returns the declared URI, `None` when the descriptor declares none.
    ///
    /// `resource` names the stream in error messages only.
    fn declared_uri(&self, resource: &str, reader: &mut dyn Read) -> Result<Option<String>>;
}

/// XML descriptor parser reading the `<uri>` child of the root element.
#[derive(Debug, Clone, Default)]
pub struct XmlDescriptorParser {
    /// Require the root element to be `<taglib>`.
    pub validate: bool,
}

impl XmlDescriptorParser {
    pub fn new(validate: bool) -> Self {
        Self { validate }
    }
}

impl DescriptorParser for XmlDescriptorParser {
    fn declared_uri(&self, resource: &str, reader: &mut dyn Read) -> Result<Option<String>> {
        let tree = xml::parse_reader(reader).map_err(|message| Error::DescriptorParse {
            resource: resource.to_string(),
            message,
        })?;

        if self.validate && tree.name != "taglib" {
            return Err(Error::DescriptorParse {
                resource: resource.to_string(),
                message: format!("expected root element <taglib>, found <{}>", tree.name),
            });
        }

        Ok(tree.child_body("uri").map(str::to_string))
    }
}

/// Stateless front for the configured [`DescriptorParser`].
#[derive(Clone, Copy)]
pub struct DescriptorLocator<'a> {
    parser: &'a dyn DescriptorParser,
}

impl<'a> DescriptorLocator<'a> {
    pub fn new(parser: &'a dyn DescriptorParser) -> Self {
        Self { parser }
    }

    /// Declared URI of the descriptor readable from `reader`.
    pub fn locate(&self, resource: &str, reader: &mut dyn Read) -> Result<Option<String>> {
        self.parser.declared_uri(resource, reader)
    }
}
