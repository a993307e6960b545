//! Control-plane messages and enums carried in replicated commands.

use super::{enum_argument_type, message_argument_type, ProtocolEnum, ProtocolMessage};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Identifier of a write pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PipelineId {
    id: Uuid,
}

impl PipelineId {
    pub fn new(id: Uuid) -> Self {
        Self { id }
    }

    pub fn random() -> Self {
        Self { id: Uuid::new_v4() }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }
}

impl ProtocolMessage for PipelineId {
    const MESSAGE_NAME: &'static str = "hdds.PipelineID";
}

/// Blocks of one container scheduled for deletion in a single transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeletedBlocksTransaction {
    pub tx_id: i64,
    pub container_id: i64,
    pub local_ids: Vec<i64>,
    /// Number of times the transaction has been retried
    pub count: i32,
}

impl ProtocolMessage for DeletedBlocksTransaction {
    const MESSAGE_NAME: &'static str = "hdds.DeletedBlocksTransaction";
}

/// Number of replicas kept for a container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReplicationFactor {
    Zero,
    One,
    Three,
}

impl ProtocolEnum for ReplicationFactor {
    const ENUM_NAME: &'static str = "hdds.ReplicationFactor";

    fn number(self) -> i32 {
        match self {
            ReplicationFactor::Zero => 0,
            ReplicationFactor::One => 1,
            ReplicationFactor::Three => 3,
        }
    }

    fn from_number(number: i32) -> Option<Self> {
        match number {
            0 => Some(ReplicationFactor::Zero),
            1 => Some(ReplicationFactor::One),
            3 => Some(ReplicationFactor::Three),
            _ => None,
        }
    }
}

message_argument_type!(PipelineId, DeletedBlocksTransaction);
enum_argument_type!(ReplicationFactor);
