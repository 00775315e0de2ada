use std::fmt::Write;

use indenter::indented;
use serde::{Deserialize, Serialize};
use strum::EnumString;

use crate::utils::{is_zero, null_as_default};

pub mod deployment;

use deployment::{DeploymentStatus, ObjectSpec};

/// Namespace of objects whose namespace is left empty.
pub const DEFAULT_NAMESPACE: &str = "default";

pub trait Object {
    fn kind(&self) -> &str;

    fn name(&self) -> &str;

    fn namespace(&self) -> &str;

    /// Identifies the object among all others:
    /// names are unique per kind within a namespace.
    fn key(&self) -> String {
        let namespace = match self.namespace() {
            "" => DEFAULT_NAMESPACE,
            namespace => namespace,
        };
        format!("{}/{}/{}", namespace, self.kind(), self.name())
    }
}

/// Minimal representation of a workload resource
/// (Deployment, StatefulSet) as found in a manifest.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, Default)]
pub struct ObjectResource {
    #[serde(default, deserialize_with = "null_as_default")]
    pub kind: String,
    #[serde(default, deserialize_with = "null_as_default", skip_serializing_if = "is_zero")]
    pub metadata: ObjectMeta,
    /// Raw document this object was read from.
    /// Bookkeeping only, never part of the serialized form.
    #[serde(skip)]
    pub template: Vec<u8>,
    /// Path of the file this object was read from.
    #[serde(skip)]
    pub file_name: String,
    #[serde(default, deserialize_with = "null_as_default", skip_serializing_if = "is_zero")]
    pub status: DeploymentStatus,
    #[serde(default, deserialize_with = "null_as_default")]
    pub spec: ObjectSpec,
}

impl Object for ObjectResource {
    fn kind(&self) -> &str {
        &self.kind
    }

    fn name(&self) -> &str {
        &self.metadata.name
    }

    fn namespace(&self) -> &str {
        &self.metadata.namespace
    }
}

impl ObjectResource {
    /// None if the kind is not one this crate knows about.
    pub fn resource_kind(&self) -> Option<ResourceKind> {
        self.kind.parse().ok()
    }
}

impl std::fmt::Display for ObjectResource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "{:<16} {}", "Kind:", self.kind)?;
        writeln!(f, "{:<16} {}", "Name:", self.metadata.name)?;
        writeln!(
            f,
            "{:<16} {}",
            "Namespace:",
            self.metadata.namespace_or_default()
        )?;
        if !self.file_name.is_empty() {
            writeln!(f, "{:<16} {}", "File:", self.file_name)?;
        }
        writeln!(f, "{:<16} {}", "Replicas:", self.spec.replicas)?;
        writeln!(
            f,
            "{:<16} {}",
            "Update Strategy:", self.spec.update_strategy.type_
        )?;
        if self.status.is_empty() {
            return Ok(());
        }
        writeln!(f, "Status:")?;
        write!(indented(f), "{}", self.status)
    }
}

/// Metadata that all persisted resources must have.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, Default)]
pub struct ObjectMeta {
    /// Unique within a namespace.
    /// Required when creating resources,
    /// primarily intended for creation idempotence.
    #[serde(default, deserialize_with = "null_as_default", skip_serializing_if = "is_zero")]
    pub name: String,
    /// The space within which name must be unique.
    /// Empty is equivalent to "default",
    /// but "default" is the canonical representation.
    #[serde(default, deserialize_with = "null_as_default", skip_serializing_if = "is_zero")]
    pub namespace: String,
}

impl ObjectMeta {
    pub fn namespace_or_default(&self) -> &str {
        if self.namespace.is_empty() {
            DEFAULT_NAMESPACE
        } else {
            &self.namespace
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString)]
pub enum ResourceKind {
    Deployment,
    StatefulSet,
}

#[cfg(test)]
mod tests {
    use serde_yaml::{Mapping, Value};

    use super::{
        deployment::{UpdateStrategy, UpdateStrategyType},
        *,
    };

    fn web() -> ObjectResource {
        ObjectResource {
            kind: "StatefulSet".to_string(),
            metadata: ObjectMeta {
                name: "web".to_string(),
                namespace: String::new(),
            },
            spec: ObjectSpec {
                update_strategy: UpdateStrategy::new(UpdateStrategyType::RollingUpdate),
                replicas: 3,
            },
            ..Default::default()
        }
    }

    fn mapping(value: &Value) -> &Mapping {
        value.as_mapping().expect("expected a mapping")
    }

    fn field<'a>(mapping: &'a Mapping, key: &str) -> &'a Value {
        mapping
            .get(&Value::from(key))
            .unwrap_or_else(|| panic!("missing key {}", key))
    }

    #[test]
    fn serialize_statefulset() -> anyhow::Result<()> {
        let value = serde_yaml::to_value(web())?;
        let root = mapping(&value);
        assert_eq!(root.len(), 3);
        assert_eq!(root.get(&"kind".into()), Some(&Value::from("StatefulSet")));
        assert!(!root.contains_key(&"status".into()));

        let metadata = mapping(field(root, "metadata"));
        assert_eq!(metadata.len(), 1);
        assert_eq!(metadata.get(&"name".into()), Some(&Value::from("web")));

        let spec = mapping(field(root, "spec"));
        assert_eq!(spec.len(), 2);
        assert_eq!(spec.get(&"replicas".into()), Some(&Value::from(3)));
        let strategy = mapping(field(spec, "updateStrategy"));
        assert_eq!(
            strategy.get(&"type".into()),
            Some(&Value::from("RollingUpdate"))
        );
        Ok(())
    }

    #[test]
    fn empty_object_keeps_kind_and_spec() -> anyhow::Result<()> {
        let value = serde_yaml::to_value(ObjectResource::default())?;
        let root = mapping(&value);
        assert_eq!(root.len(), 2);
        assert_eq!(root.get(&"kind".into()), Some(&Value::from("")));
        assert_eq!(
            root.get(&"spec".into()),
            Some(&Value::Mapping(Mapping::new()))
        );
        Ok(())
    }

    #[test]
    fn round_trip_drops_bookkeeping() -> anyhow::Result<()> {
        let mut object = web();
        object.metadata.namespace = "prod".to_string();
        object.status = DeploymentStatus {
            observed_generation: 9,
            replicas: 3,
            updated_replicas: 1,
            available_replicas: 2,
            unavailable_replicas: 1,
            ready_replicas: 2,
            current_revision: "web-5d4f".to_string(),
            update_revision: "web-7c9b".to_string(),
        };
        object.template = b"kind: StatefulSet".to_vec();
        object.file_name = "web.yaml".to_string();

        let text = serde_yaml::to_string(&object)?;
        assert!(!text.contains("web.yaml"));
        let decoded: ObjectResource = serde_yaml::from_str(&text)?;

        assert!(decoded.template.is_empty());
        assert!(decoded.file_name.is_empty());
        object.template.clear();
        object.file_name.clear();
        assert_eq!(decoded, object);
        Ok(())
    }

    #[test]
    fn present_zero_values_are_accepted() -> anyhow::Result<()> {
        let text = r#"
kind: Deployment
metadata:
  name: ""
  namespace: ""
status:
  observedGeneration: 0
  replicas: 0
  currentRevision: ""
spec:
  replicas: 0
  updateStrategy:
    type: ""
"#;
        let object: ObjectResource = serde_yaml::from_str(text)?;
        assert_eq!(
            object,
            ObjectResource {
                kind: "Deployment".to_string(),
                ..Default::default()
            }
        );
        let value = serde_yaml::to_value(&object)?;
        assert_eq!(mapping(&value).len(), 2);
        Ok(())
    }

    #[test]
    fn missing_and_null_keys_are_zero() -> anyhow::Result<()> {
        let missing: ObjectResource = serde_yaml::from_str("metadata:\n  name: web\n")?;
        assert_eq!(missing.kind, "");
        assert_eq!(missing.spec, ObjectSpec::default());

        let null: ObjectResource =
            serde_yaml::from_str("kind: ~\nmetadata: ~\nstatus: ~\nspec:\n  updateStrategy: ~\n")?;
        assert_eq!(null, ObjectResource::default());
        Ok(())
    }

    #[test]
    fn unknown_keys_are_ignored() -> anyhow::Result<()> {
        let text = r#"
apiVersion: apps/v1
kind: StatefulSet
metadata:
  name: web
  labels:
    app: nginx
spec:
  replicas: 3
  serviceName: nginx
  updateStrategy:
    type: RollingUpdate
    rollingUpdate:
      partition: 0
"#;
        let object: ObjectResource = serde_yaml::from_str(text)?;
        assert_eq!(object, web());
        Ok(())
    }

    #[test]
    fn wrong_type_is_an_error() {
        let result =
            serde_yaml::from_str::<ObjectResource>("kind: StatefulSet\nspec:\n  replicas: three\n");
        assert!(result.is_err());
        let result = serde_yaml::from_str::<ObjectResource>("metadata: web\n");
        assert!(result.is_err());
    }

    #[test]
    fn object_accessors() {
        let mut object = web();
        assert_eq!(object.name(), "web");
        assert_eq!(object.namespace(), "");
        assert_eq!(object.metadata.namespace_or_default(), "default");
        assert_eq!(object.key(), "default/StatefulSet/web");
        assert_eq!(object.resource_kind(), Some(ResourceKind::StatefulSet));

        object.metadata.namespace = "prod".to_string();
        object.kind = "CronJob".to_string();
        assert_eq!(object.key(), "prod/CronJob/web");
        assert_eq!(object.resource_kind(), None);
    }

    #[test]
    fn describe() {
        let mut object = web();
        let text = object.to_string();
        assert!(text.contains("Namespace:       default"));
        assert!(text.contains("Update Strategy: RollingUpdate"));
        assert!(!text.contains("Status:"));

        object.status.ready_replicas = 3;
        let text = object.to_string();
        assert!(text.contains("Status:"));
        assert!(text.contains("    Replicas:"));
    }
}
