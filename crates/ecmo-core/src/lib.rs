pub mod anthropometrics;
mod bands;
pub mod candidacy;
pub mod cannula;
pub mod criteria;
pub mod initiation;
pub mod pipeline;
pub mod risk;
pub mod sofa;
pub mod timeout;

pub use anthropometrics::{anthropometrics_for, compute_anthropometrics};
pub use candidacy::aggregate_candidacy;
pub use cannula::{
    CANNULA_TABLE, CannulaSpec, cannula_by_french, cannula_reference, cannulation_sites,
    recommend_cannulas,
};
pub use criteria::evaluate_criteria;
pub use initiation::{plan_initiation, target_flow};
pub use pipeline::{ALTERNATIVE_CONSIDERATIONS, CandidacyOutcome, assess, run_candidacy};
pub use risk::{compute_risk_score, resp_score, resp_tier, save_score, save_tier};
pub use sofa::{
    coagulation_points, cns_points, compute_sofa, liver_points, mortality_band,
    renal_points, respiratory_points,
};
pub use timeout::{TARGET_ACT_SECONDS, evaluate_timeout};
