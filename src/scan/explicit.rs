//! Step 1: Explicit registration from the deployment descriptor
//!
//! Every `<taglib>` element found directly under the descriptor root or under
//! its `<jsp-config>` element declares a `<taglib-uri>` and a
//! `<taglib-location>`. Declarations are registered unconditionally, so they
//! win over anything the implicit scanners find.
//!
//! Location normalization:
//! - a relative location is taken relative to `/WEB-INF/`;
//! - a location naming a `.jar` is resolved to the physical archive and points
//!   at the archive's `META-INF/taglib.tld` entry.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use log::{debug, warn};

use super::ScanEnv;
use crate::context::ResourceContext;
use crate::defaults::{DEFAULT_TLD_ENTRY, JAR_SUFFIX, WEB_INF, WEB_XML};
use crate::error::{Error, Result};
use crate::record::{LocationRecord, Mapping};
use crate::uri::{uri_type, UriType};
use crate::xml::{self, TreeNode};

/// Registers the explicit declarations and returns how many were stored.
///
/// `alternate` names a deployment descriptor on disk to use instead of
/// `/WEB-INF/web.xml`. A descriptor that does not exist contributes nothing.
pub fn execute(
    mapping: &mut Mapping,
    env: &ScanEnv<'_>,
    context: &dyn ResourceContext,
    alternate: Option<&Path>,
) -> Result<usize> {
    let (name, tree) = match alternate {
        Some(path) => {
            let file = match File::open(path) {
                Ok(file) => file,
                Err(e) => {
                    warn!(
                        "Alternate deployment descriptor {} could not be opened: {}",
                        path.display(),
                        e
                    );
                    return Ok(0);
                }
            };
            let name = path.display().to_string();
            let tree = parse(&name, &mut BufReader::new(file))?;
            (name, tree)
        }
        None => match context.open(WEB_XML)? {
            Some(mut reader) => (WEB_XML.to_string(), parse(WEB_XML, &mut reader)?),
            None => {
                debug!("No deployment descriptor at {}", WEB_XML);
                return Ok(0);
            }
        },
    };

    let mut registered = 0;
    for taglib in declarations(&tree) {
        if let Some(record) = declaration_to_record(taglib, env, context)? {
            mapping.register_explicit(record);
            registered += 1;
        }
    }
    debug!("{} explicit taglib declaration(s) in {}", registered, name);
    Ok(registered)
}

fn parse(name: &str, reader: &mut dyn Read) -> Result<TreeNode> {
    xml::parse_reader(reader).map_err(|message| Error::DeploymentDescriptor {
        path: name.to_string(),
        message,
    })
}

/// `<taglib>` elements under the root, then under `<jsp-config>`.
fn declarations(root: &TreeNode) -> Vec<&TreeNode> {
    let mut taglibs: Vec<&TreeNode> = root.find_children("taglib").collect();
    if let Some(jsp_config) = root.find_child("jsp-config") {
        taglibs.extend(jsp_config.find_children("taglib"));
    }
    taglibs
}

fn declaration_to_record(
    taglib: &TreeNode,
    env: &ScanEnv<'_>,
    context: &dyn ResourceContext,
) -> Result<Option<LocationRecord>> {
    let Some(uri) = taglib.child_body("taglib-uri") else {
        debug!("Ignoring <taglib> without <taglib-uri>");
        return Ok(None);
    };
    if env.reserved.is_reserved(uri) {
        debug!("Ignoring reserved taglib uri {} in deployment descriptor", uri);
        return Ok(None);
    }
    let Some(location) = taglib.child_body("taglib-location") else {
        return Ok(None);
    };

    let location = match uri_type(location) {
        UriType::Relative => format!("{}{}", WEB_INF, location),
        UriType::Absolute | UriType::RootRelative => location.to_string(),
    };

    if location.ends_with(JAR_SUFFIX) {
        let archive = context
            .resolve(&location)
            .ok_or_else(|| Error::UnresolvedResource {
                path: location.clone(),
            })?;
        Ok(Some(LocationRecord::archived(uri, &archive, DEFAULT_TLD_ENTRY)))
    } else {
        Ok(Some(LocationRecord::direct(uri, &location)))
    }
}
