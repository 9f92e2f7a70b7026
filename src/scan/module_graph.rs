//! Step 3: Descriptors exported by imported modules
//!
//! Same registration rule as the local content scan. Nothing found here is
//! ever fatal: unreadable resources are logged and skipped, and a graph that
//! cannot be enumerated contributes nothing.

use log::warn;

use super::ScanEnv;
use crate::defaults::{MODULE_NAMESPACE, MODULE_PATTERN};
use crate::module_graph::ModuleGraph;
use crate::record::{LocationRecord, Mapping};

/// Scan `graph` if the host exposes one; returns the number of records stored.
pub fn execute(mapping: &mut Mapping, env: &ScanEnv<'_>, graph: Option<&dyn ModuleGraph>) -> usize {
    let Some(graph) = graph else {
        return 0;
    };

    let resources = match graph.descriptor_resources(MODULE_NAMESPACE, MODULE_PATTERN) {
        Ok(resources) => resources,
        Err(e) => {
            warn!("Module graph could not be enumerated: {}", e);
            return 0;
        }
    };

    let locator = env.locator();
    let mut stored = 0;
    for resource in resources {
        let uri = graph
            .open(&resource)
            .and_then(|mut stream| locator.locate(&resource, &mut stream));
        match uri {
            Ok(Some(uri)) => {
                if mapping.register_implicit(LocationRecord::direct(&uri, &resource), env.reserved) {
                    stored += 1;
                }
            }
            Ok(None) => {}
            Err(e) => warn!("Skipping module resource {}: {}", resource, e),
        }
    }
    stored
}
