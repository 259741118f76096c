mod document;
mod session;

pub use document::{
    ConstraintDocument, DocumentError, ModelDocument, ObjectiveDocument, SolutionDocument,
};
pub use session::Session;
