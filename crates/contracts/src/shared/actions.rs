use serde::{Deserialize, Serialize};

/// Header carrying the semantic operation of a mutating request.
///
/// The backend checks it against its per-endpoint allow list and writes it to
/// the audit log.
pub const ACTION_HEADER: &str = "X-Action-Identifier";

/// Every action identifier the backend accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ActionId {
    AddCollectionDocument,
    UpdateCollectionDocument,
    DeleteCollectionDocument,
    AddManagementItem,
    UpdateManagementRecord,
    DeleteManagementRecord,
    CreateBook,
    UpdateBook,
    DeleteBook,
    AddLoanPayment,
}

impl ActionId {
    pub const fn as_str(&self) -> &'static str {
        match self {
            ActionId::AddCollectionDocument => "ADD_COLLECTION_DOCUMENT",
            ActionId::UpdateCollectionDocument => "UPDATE_COLLECTION_DOCUMENT",
            ActionId::DeleteCollectionDocument => "DELETE_COLLECTION_DOCUMENT",
            ActionId::AddManagementItem => "ADD_MANAGEMENT_ITEM",
            ActionId::UpdateManagementRecord => "UPDATE_MANAGEMENT_RECORD",
            ActionId::DeleteManagementRecord => "DELETE_MANAGEMENT_RECORD",
            ActionId::CreateBook => "CREATE_BOOK",
            ActionId::UpdateBook => "UPDATE_BOOK",
            ActionId::DeleteBook => "DELETE_BOOK",
            ActionId::AddLoanPayment => "ADD_LOAN_PAYMENT",
        }
    }
}

impl std::fmt::Display for ActionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serde_name_matches_header_value() {
        let actions = [
            ActionId::AddCollectionDocument,
            ActionId::DeleteManagementRecord,
            ActionId::CreateBook,
            ActionId::AddLoanPayment,
        ];
        for action in actions {
            let json = serde_json::to_string(&action).unwrap();
            assert_eq!(json, format!("\"{}\"", action.as_str()));
        }
    }
}
