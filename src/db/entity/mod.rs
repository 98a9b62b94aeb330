pub mod user;
pub mod wallet;
pub mod transaction;
pub mod alert;

pub use user::Entity as User;
pub use wallet::Entity as Wallet;
pub use transaction::Entity as Transaction;
pub use alert::Entity as Alert;
