pub mod language;
pub mod problem;
pub mod response;
pub mod submission;

pub use language::Language;
pub use problem::{timestamp_from_unix, Problem, ProblemView, SpecialProblem};
pub use response::{
    AcceptedProblemsResponse, AcceptedQuestion, SubmissionDetailResponse, SubmissionListResponse,
    SubmissionSummary,
};
pub use submission::{FetchedSubmission, LastSubmission};
