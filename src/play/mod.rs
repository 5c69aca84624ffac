pub mod interpret;
pub mod rotation;
pub mod token;
pub mod view;

pub use interpret::Reading;
pub use token::MoveToken;
pub use view::LegalMoves;
pub use view::MinRaise;
pub use view::Observation;
