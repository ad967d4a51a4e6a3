pub mod registrations;
pub mod tournaments;
pub mod users;

pub use registrations::CreateRegistrationData;
pub use tournaments::{CreateTournamentData, TournamentDetailsRow, TournamentStatus};
pub use users::{CreateUserData, UserCredentialsRow, UserRole};
