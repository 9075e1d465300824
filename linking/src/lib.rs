//! Linking of anonymous questionnaire answers.
//!
//! A student answers questionnaires anonymously with a credential from [`ps_credentials`]. Each answer carries, per
//! study it takes part in, a [`LinkInfo`]: a fresh `s = h^z` and `t = e(H(study), s)^key` along with a proof that
//! `key` is the hidden key attribute of a valid credential and of the pseudonym shown for the questionnaire.
//! Answers of one student stay unlinkable until the student releases the token `T = H(study)^key` of a study,
//! letting the study's [`Researcher`] group exactly that student's answers by checking `e(T, s) == t`.

pub mod answer;
pub mod error;
pub mod link_info;
pub mod portal;
pub mod researcher;
pub mod setup;
pub mod student;

pub use answer::Answer;
pub use error::LinkingError;
pub use link_info::{LinkInfo, LinkInfoCorrectness, LinkToken};
pub use portal::StudyPortal;
pub use researcher::Researcher;
pub use setup::LinkingParams;
pub use student::Student;
