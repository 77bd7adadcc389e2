pub mod a001_collection;
pub mod a002_ledger;
pub mod a003_book;
pub mod a004_loan;
pub mod a005_chat;
