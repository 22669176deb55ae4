use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::designer::DesignerError;
use crate::layout::{FieldAttribute, Layout, LayoutEditor};
use crate::substitution::tokens::Placeholder;

/// One edit sent by the designer client.
///
/// Tagged by `op`, e.g. `{"op": "moveField", "key": "title", "x": 10, "y": 20}`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "op", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum DesignerOp {
    UpdateField {
        key: String,
        attribute: FieldAttribute,
        value: Value,
    },
    AddField {
        name: String,
    },
    MoveField {
        key: String,
        x: f64,
        y: f64,
    },
    ResizeField {
        key: String,
        width: f64,
        height: f64,
    },
    /// `placeholder` is the bare name, e.g. `fullName`. `offset` is a
    /// character position in the label; absent appends.
    InjectPlaceholder {
        key: String,
        placeholder: String,
        offset: Option<usize>,
    },
    RemoveField {
        key: String,
    },
    Rename {
        name: String,
    },
}

#[derive(Debug, Clone)]
pub struct DesignerSession {
    pub id: Uuid,
    /// Login session (token id) that owns this designer session.
    pub owner: Uuid,
    pub owner_expires_at: DateTime<Utc>,
    pub template_id: Option<i32>,
    pub name: String,
    pub editor: LayoutEditor,
    /// Unsaved edits exist.
    pub dirty: bool,
}

impl DesignerSession {
    pub fn new(
        owner: Uuid,
        owner_expires_at: DateTime<Utc>,
        template_id: Option<i32>,
        name: String,
        layout: Layout,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            owner,
            owner_expires_at,
            template_id,
            name,
            editor: LayoutEditor::new(layout),
            dirty: false,
        }
    }

    /// Applies one op. Returns the new key for `AddField`.
    ///
    /// A failed op leaves the layout and the dirty flag untouched.
    pub fn apply(&mut self, op: DesignerOp) -> Result<Option<String>, DesignerError> {
        let added = match op {
            DesignerOp::UpdateField {
                key,
                attribute,
                value,
            } => {
                self.editor.update_field(&key, attribute, &value)?;
                None
            }
            DesignerOp::AddField { name } => Some(self.editor.add_field(&name)?),
            DesignerOp::MoveField { key, x, y } => {
                self.editor.move_field(&key, x, y)?;
                None
            }
            DesignerOp::ResizeField { key, width, height } => {
                self.editor.resize_field(&key, width, height)?;
                None
            }
            DesignerOp::InjectPlaceholder {
                key,
                placeholder,
                offset,
            } => {
                let placeholder = Placeholder::from_name(placeholder.trim())
                    .ok_or(DesignerError::UnknownPlaceholder(placeholder))?;
                self.editor
                    .inject_placeholder(&key, &placeholder.token(), offset)?;
                None
            }
            DesignerOp::RemoveField { key } => {
                self.editor.remove_field(&key)?;
                None
            }
            DesignerOp::Rename { name } => {
                let name = name.trim();
                if name.is_empty() {
                    return Err(DesignerError::EmptyName);
                }
                self.name = name.to_string();
                None
            }
        };
        self.dirty = true;
        Ok(added)
    }

    pub fn view(&self) -> DesignerSessionView {
        DesignerSessionView {
            id: self.id,
            template_id: self.template_id,
            name: self.name.clone(),
            layout: self.editor.layout().clone(),
            dirty: self.dirty,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DesignerSessionView {
    pub id: Uuid,
    pub template_id: Option<i32>,
    pub name: String,
    pub layout: Layout,
    pub dirty: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::{starter_layout, LayoutError};
    use serde_json::json;

    fn session() -> DesignerSession {
        DesignerSession::new(
            Uuid::new_v4(),
            Utc::now(),
            None,
            "Clearance".into(),
            starter_layout(),
        )
    }

    #[test]
    fn test_op_decodes_from_tagged_json() {
        let op: DesignerOp = serde_json::from_value(json!({
            "op": "injectPlaceholder",
            "key": "content",
            "placeholder": "fullName"
        }))
        .unwrap();
        assert_eq!(
            op,
            DesignerOp::InjectPlaceholder {
                key: "content".into(),
                placeholder: "fullName".into(),
                offset: None,
            }
        );

        let op: DesignerOp = serde_json::from_value(json!({
            "op": "updateField",
            "key": "title",
            "attribute": "fontSize",
            "value": "18"
        }))
        .unwrap();
        assert!(matches!(
            op,
            DesignerOp::UpdateField { attribute: FieldAttribute::FontSize, .. }
        ));
    }

    #[test]
    fn test_apply_marks_dirty_and_returns_added_key() {
        let mut s = session();
        assert!(!s.dirty);
        let key = s
            .apply(DesignerOp::AddField { name: "Birth Place".into() })
            .unwrap();
        assert_eq!(key.as_deref(), Some("birthPlace"));
        assert!(s.dirty);
    }

    #[test]
    fn test_failed_op_keeps_session_clean() {
        let mut s = session();
        let before = s.editor.layout().clone();
        let err = s
            .apply(DesignerOp::AddField { name: "Title".into() })
            .unwrap_err();
        assert_eq!(
            err,
            DesignerError::Layout(LayoutError::DuplicateField("title".into()))
        );
        assert_eq!(s.editor.layout(), &before);
        assert!(!s.dirty);
    }

    #[test]
    fn test_inject_placeholder_uses_token() {
        let mut s = session();
        s.apply(DesignerOp::UpdateField {
            key: "content".into(),
            attribute: FieldAttribute::Label,
            value: json!("This certifies that"),
        })
        .unwrap();
        s.apply(DesignerOp::InjectPlaceholder {
            key: "content".into(),
            placeholder: "fullName".into(),
            offset: None,
        })
        .unwrap();
        assert_eq!(
            s.editor.layout().get("content").unwrap().label,
            "This certifies that {{fullName}}"
        );
    }

    #[test]
    fn test_inject_unknown_placeholder_rejected() {
        let mut s = session();
        let err = s
            .apply(DesignerOp::InjectPlaceholder {
                key: "content".into(),
                placeholder: "nickname".into(),
                offset: None,
            })
            .unwrap_err();
        assert_eq!(err, DesignerError::UnknownPlaceholder("nickname".into()));
    }

    #[test]
    fn test_rename_rejects_blank() {
        let mut s = session();
        assert_eq!(
            s.apply(DesignerOp::Rename { name: "   ".into() }).unwrap_err(),
            DesignerError::EmptyName
        );
        s.apply(DesignerOp::Rename { name: " Indigency ".into() }).unwrap();
        assert_eq!(s.name, "Indigency");
    }
}
