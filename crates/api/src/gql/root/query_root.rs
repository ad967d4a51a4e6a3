use async_graphql::MergedObject;

use crate::gql::domains::registrations::RegistrationQuery;
use crate::gql::domains::tournaments::TournamentQuery;
use crate::gql::domains::users::UserQuery;

#[derive(MergedObject, Default)]
pub struct QueryRoot(RegistrationQuery, TournamentQuery, UserQuery);
