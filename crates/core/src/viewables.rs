//! 3D view selection over a Model Derivative manifest.
//!
//! The manifest is a tree of nodes (`derivatives` at the root, `children`
//! below). Every `geometry` node with role `3d` is a view the Revit add-in
//! can export. Nodes named after their phase are the per-phase default
//! views and are left out.

use serde::Serialize;
use serde_json::Value;

/// Node type of a renderable view.
pub const NODE_TYPE_GEOMETRY: &str = "geometry";

/// Role of a 3D view.
pub const ROLE_3D: &str = "3d";

/// One selectable 3D view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ViewableRow {
    pub viewable_id: String,
    pub guid: String,
    pub name: String,
    pub role: String,
    pub view_sets: Option<String>,
    /// The caller is currently looking at this view.
    pub is_current: bool,
}

/// Collect all 3D geometry viewables, depth-first in manifest order.
///
/// `current` is the viewable id loaded in the viewer, if any.
pub fn list_3d_viewables(manifest: &Value, current: Option<&str>) -> Vec<ViewableRow> {
    let mut rows = Vec::new();
    visit(manifest, current, &mut rows);
    rows
}

fn visit(node: &Value, current: Option<&str>, rows: &mut Vec<ViewableRow>) {
    let Some(obj) = node.as_object() else {
        return;
    };

    if str_field(node, "type") == Some(NODE_TYPE_GEOMETRY) && str_field(node, "role") == Some(ROLE_3D)
    {
        if let Some(row) = to_row(node, current) {
            rows.push(row);
        }
    }

    for key in ["derivatives", "children"] {
        if let Some(Value::Array(children)) = obj.get(key) {
            for child in children {
                visit(child, current, rows);
            }
        }
    }
}

fn to_row(node: &Value, current: Option<&str>) -> Option<ViewableRow> {
    let name = str_field(node, "name").unwrap_or_default();
    if is_phase_view(name, node.get("phaseNames")) {
        return None;
    }

    let viewable_id = str_field(node, "viewableID")?.to_string();
    let is_current = current == Some(viewable_id.as_str());

    Some(ViewableRow {
        guid: str_field(node, "guid").unwrap_or_default().to_string(),
        name: name.to_string(),
        role: ROLE_3D.to_string(),
        view_sets: node.get("ViewSets").and_then(flatten_text),
        is_current,
        viewable_id,
    })
}

/// A phase view carries the phase name as its own name.
fn is_phase_view(name: &str, phase_names: Option<&Value>) -> bool {
    match phase_names.and_then(flatten_text) {
        Some(phases) => phases == name,
        None => false,
    }
}

fn str_field<'a>(node: &'a Value, key: &str) -> Option<&'a str> {
    node.get(key).and_then(Value::as_str)
}

/// Render a string or an array of strings as one comma-separated string.
fn flatten_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Array(items) => {
            let parts: Vec<&str> = items.iter().filter_map(Value::as_str).collect();
            (!parts.is_empty()).then(|| parts.join(","))
        }
        _ => None,
    }
}
