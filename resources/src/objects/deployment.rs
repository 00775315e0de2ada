use std::fmt::Write;

use indenter::indented;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::utils::{is_zero, null_as_default};

/// The most recently observed status of the Deployment / StatefulSet.
/// A read-only snapshot, this crate never updates it.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct DeploymentStatus {
    /// The generation observed by the deployment controller.
    #[serde(default, deserialize_with = "null_as_default", skip_serializing_if = "is_zero")]
    pub observed_generation: i64,
    /// Total number of non-terminated pods targeted by this deployment
    /// (their labels match the selector).
    #[serde(default, deserialize_with = "null_as_default", skip_serializing_if = "is_zero")]
    pub replicas: i32,
    /// Total number of non-terminated pods targeted by this deployment
    /// that have the desired template spec.
    #[serde(default, deserialize_with = "null_as_default", skip_serializing_if = "is_zero")]
    pub updated_replicas: i32,
    /// Total number of available pods (ready for at least minReadySeconds)
    /// targeted by this deployment.
    #[serde(default, deserialize_with = "null_as_default", skip_serializing_if = "is_zero")]
    pub available_replicas: i32,
    /// Total number of unavailable pods targeted by this deployment.
    #[serde(default, deserialize_with = "null_as_default", skip_serializing_if = "is_zero")]
    pub unavailable_replicas: i32,
    /// The number of pods created by the StatefulSet controller
    /// that have a Ready Condition.
    #[serde(default, deserialize_with = "null_as_default", skip_serializing_if = "is_zero")]
    pub ready_replicas: i32,
    /// The last revision completely deployed before any updates.
    #[serde(default, deserialize_with = "null_as_default", skip_serializing_if = "is_zero")]
    pub current_revision: String,
    /// The version currently being deployed.
    /// Matches current_revision once the rollout is complete.
    #[serde(default, deserialize_with = "null_as_default", skip_serializing_if = "is_zero")]
    pub update_revision: String,
}

impl DeploymentStatus {
    pub fn is_empty(&self) -> bool {
        is_zero(self)
    }

    /// Whether the observed revisions say the last rollout has finished.
    /// Nothing is known while either revision is unset.
    pub fn is_rollout_complete(&self) -> bool {
        !self.update_revision.is_empty() && self.update_revision == self.current_revision
    }
}

impl std::fmt::Display for DeploymentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "{:<22} {}", "Observed Generation:", self.observed_generation)?;
        writeln!(
            f,
            "{:<22} {} ready / {} available / {} unavailable / {} updated / {} total",
            "Replicas:",
            self.ready_replicas,
            self.available_replicas,
            self.unavailable_replicas,
            self.updated_replicas,
            self.replicas
        )?;
        writeln!(f, "Revisions:")?;
        writeln!(indented(f), "{:<10} {}", "Current:", self.current_revision)?;
        writeln!(indented(f), "{:<10} {}", "Update:", self.update_revision)
    }
}

/// Desired state of the workload.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct ObjectSpec {
    /// The strategy that will be employed to update pods
    /// when a revision is made to the template.
    #[serde(default, deserialize_with = "null_as_default", skip_serializing_if = "is_zero")]
    pub update_strategy: UpdateStrategy,
    /// How many intended pods are required.
    #[serde(default, deserialize_with = "null_as_default", skip_serializing_if = "is_zero")]
    pub replicas: i32,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, Default)]
pub struct UpdateStrategy {
    /// The chosen strategy, e.g. RollingUpdate.
    #[serde(
        rename = "type",
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "is_zero"
    )]
    pub type_: String,
}

impl UpdateStrategy {
    pub fn new(strategy: UpdateStrategyType) -> Self {
        UpdateStrategy {
            type_: strategy.to_string(),
        }
    }

    /// None if the type is empty or not a known strategy name.
    pub fn strategy_type(&self) -> Option<UpdateStrategyType> {
        self.type_.parse().ok()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
pub enum UpdateStrategyType {
    /// Replace pods one by one with pods of the new revision.
    RollingUpdate,
    /// Only replace pods after they are deleted manually.
    OnDelete,
    /// Kill all existing pods before creating new ones.
    Recreate,
}
