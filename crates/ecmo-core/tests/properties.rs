use ecmo_core::{
    CANNULA_TABLE, aggregate_candidacy, compute_anthropometrics, compute_sofa, evaluate_criteria,
    mortality_band, recommend_cannulas, resp_score, resp_tier, save_score, save_tier,
};
use ecmo_model::{
    AcuteEtiology, ClinicalObservations, CriteriaFlags, EcmoMode, EngineConfig, EcprInputs,
    ModeObservations, PatientProfile, RespDiagnosis, RespObservations, RiskTier, SaveObservations,
    Sex, VasopressorSupport,
};
use proptest::prelude::*;

const SAVE_MIN: i32 = 0;
const SAVE_MAX: i32 = 22 + 3 + 15 + 8 + 7 + 11;
const RESP_MIN: i32 = -2 - 2 - 3 - 3 - 2 - 1 - 1 - 7;
const RESP_MAX: i32 = 3 + 6;

fn etiology() -> impl Strategy<Value = AcuteEtiology> {
    prop_oneof![
        Just(AcuteEtiology::PostCardiotomy),
        Just(AcuteEtiology::AcuteMyocardialInfarction),
        Just(AcuteEtiology::Myocarditis),
        Just(AcuteEtiology::Other),
    ]
}

fn diagnosis() -> impl Strategy<Value = RespDiagnosis> {
    prop_oneof![
        Just(RespDiagnosis::ViralPneumonia),
        Just(RespDiagnosis::BacterialPneumonia),
        Just(RespDiagnosis::Asthma),
        Just(RespDiagnosis::TraumaOrSurgery),
        Just(RespDiagnosis::Other),
    ]
}

fn vasopressor() -> impl Strategy<Value = VasopressorSupport> {
    prop_oneof![
        Just(VasopressorSupport::None),
        Just(VasopressorSupport::LowDoseInotrope),
        Just(VasopressorSupport::ModerateDose),
        Just(VasopressorSupport::HighDose),
        Just(VasopressorSupport::MaximalDose),
    ]
}

fn save_inputs() -> impl Strategy<Value = SaveObservations> {
    (any::<bool>(), etiology(), 0.0f64..500.0, 0.0f64..200.0).prop_map(
        |(pre_ecmo_cardiac_arrest, acute_etiology, intubation_hours, diastolic_bp)| {
            SaveObservations {
                pre_ecmo_cardiac_arrest,
                acute_etiology,
                intubation_hours,
                diastolic_bp,
            }
        },
    )
}

fn resp_inputs() -> impl Strategy<Value = RespObservations> {
    (
        any::<bool>(),
        0.0f64..1000.0,
        6.5f64..7.8,
        0.0f64..30.0,
        0.0f64..60.0,
        diagnosis(),
        any::<bool>(),
    )
        .prop_map(
            |(immunocompromised, ventilation_hours, ph, peep, plateau_pressure, acute_diagnosis, cns_dysfunction)| {
                RespObservations {
                    immunocompromised,
                    ventilation_hours,
                    ph,
                    peep,
                    plateau_pressure,
                    acute_diagnosis,
                    cns_dysfunction,
                }
            },
        )
}

fn observations() -> impl Strategy<Value = ClinicalObservations> {
    (
        0.0f64..600.0,
        0.0f64..500.0,
        0.0f64..30.0,
        vasopressor(),
        3.0f64..=15.0,
        0.0f64..10.0,
        0.0f64..3000.0,
    )
        .prop_map(
            |(pao2_fio2, platelets, bilirubin, vasopressor, gcs, creatinine, urine_output)| {
                ClinicalObservations {
                    pao2_fio2,
                    platelets,
                    bilirubin,
                    mean_arterial_pressure: 70.0,
                    vasopressor,
                    glasgow_coma_scale: gcs,
                    creatinine,
                    urine_output,
                    mode: ModeObservations::VenoVenous(RespObservations {
                        immunocompromised: false,
                        ventilation_hours: 24.0,
                        ph: 7.3,
                        peep: 8.0,
                        plateau_pressure: 25.0,
                        acute_diagnosis: RespDiagnosis::ViralPneumonia,
                        cns_dysfunction: false,
                    }),
                }
            },
        )
}

fn flags() -> impl Strategy<Value = CriteriaFlags> {
    proptest::collection::vec(any::<bool>(), 8).prop_map(|b| CriteriaFlags {
        reversible_condition: b[0],
        no_absolute_contraindications: b[1],
        informed_consent: b[2],
        conventional_therapy_failed: b[3],
        irreversible_brain_damage: b[4],
        terminal_illness: b[5],
        severe_bleeding: b[6],
        severe_immunosuppression: b[7],
    })
}

proptest! {
    #[test]
    fn save_score_stays_in_range(
        age in 0u32..=120,
        weight in 1.0f64..250.0,
        inputs in save_inputs(),
    ) {
        let result = save_score(age, weight, &inputs);
        prop_assert!((SAVE_MIN..=SAVE_MAX).contains(&result.raw_score));
        prop_assert_eq!(result.components.len(), 6);
        prop_assert_eq!(result.raw_score, result.components.iter().map(|c| c.points).sum::<i32>());
    }

    #[test]
    fn resp_score_stays_in_range(
        age in 0u32..=120,
        pf in 0.0f64..600.0,
        inputs in resp_inputs(),
    ) {
        let result = resp_score(age, pf, &inputs);
        prop_assert!((RESP_MIN..=RESP_MAX).contains(&result.raw_score));
        prop_assert_eq!(result.components.len(), 9);
    }

    #[test]
    fn save_tier_is_monotone(score in -30i32..80) {
        // Higher SAVE means lower risk.
        prop_assert!(save_tier(score + 1).0 <= save_tier(score).0);
    }

    #[test]
    fn resp_tier_is_monotone(score in -30i32..20) {
        prop_assert!(resp_tier(score + 1).0 <= resp_tier(score).0);
    }

    #[test]
    fn sofa_total_is_bounded(obs in observations()) {
        let result = compute_sofa(&obs);
        prop_assert!(result.sofa_total <= 24);
        prop_assert!(result.components.iter().all(|c| (0..=4).contains(&c.points)));
    }

    #[test]
    fn mortality_band_never_improves(total in 0u8..24) {
        let percent = |band: &str| band.trim_start_matches('~').trim_end_matches('%').parse::<u32>().unwrap();
        prop_assert!(percent(mortality_band(total + 1)) >= percent(mortality_band(total)));
    }

    #[test]
    fn criteria_counts_are_bounded(
        age in 0u32..=120,
        weight in 20.0f64..250.0,
        height in 120.0f64..220.0,
        flags in flags(),
        witnessed in any::<bool>(),
        ph in 6.5f64..7.6,
        lactate in 0.0f64..30.0,
    ) {
        let profile = PatientProfile::new(age, Sex::Female, weight, height, EcmoMode::VenoVenous).unwrap();
        let ecpr = EcprInputs {
            witnessed_arrest: witnessed,
            bystander_cpr: false,
            no_rosc_within_60_min: true,
            ph,
            lactate,
        };
        let result = evaluate_criteria(&profile, &flags, Some(&ecpr));
        prop_assert!(result.inclusion_met <= 6);
        prop_assert!(result.exclusion_count <= 6);
        prop_assert!(result.ecpr_criteria_met.is_some_and(|met| met <= 5));
    }

    #[test]
    fn candidacy_tier_follows_score(
        save in SAVE_MIN..=SAVE_MAX,
        obs in observations(),
        flags in flags(),
        age in 18u32..=90,
    ) {
        let profile = PatientProfile::new(age, Sex::Male, 80.0, 175.0, EcmoMode::VenoArterial).unwrap();
        let risk = ecmo_model::RiskScoreResult {
            kind: ecmo_model::RiskScoreKind::Save,
            raw_score: save,
            risk_tier: save_tier(save).0,
            survival_estimate: save_tier(save).1.to_string(),
            components: vec![],
        };
        let sofa = compute_sofa(&obs);
        let criteria = evaluate_criteria(&profile, &flags, None);
        let decision = aggregate_candidacy(&risk, &sofa, &criteria);
        prop_assert_eq!(decision.score, decision.reasons.iter().map(|r| r.points).sum::<i32>());
        prop_assert_eq!(decision.tier, ecmo_model::CandidacyTier::from_score(decision.score));
        prop_assert!(decision.score <= decision.max_score());
        prop_assert_eq!(decision.reasons.len(), 4);
    }

    #[test]
    fn drainage_pick_is_minimal(target in 0.5f64..6.5) {
        let config = EngineConfig::default();
        let rec = recommend_cannulas(target, 1.9, EcmoMode::VenoVenous, &config);
        let required = target * config.safety_margin;
        prop_assert!(rec.drainage_max_flow >= required);
        let smaller_fits = CANNULA_TABLE
            .iter()
            .any(|spec| spec.max_flow < rec.drainage_max_flow && spec.max_flow >= required);
        prop_assert!(!smaller_fits);
    }

    #[test]
    fn return_covers_margin_in_standard_range(
        target in 0.5f64..6.5,
        bsa in 1.5f64..=2.5,
        va in any::<bool>(),
    ) {
        let mode = if va { EcmoMode::VenoArterial } else { EcmoMode::VenoVenous };
        let rec = recommend_cannulas(target, bsa, mode, &EngineConfig::default());
        prop_assert!(rec.return_max_flow >= rec.required_flow);
    }

    #[test]
    fn computations_are_idempotent(
        weight in 1.0f64..250.0,
        height in 50.0f64..230.0,
        obs in observations(),
    ) {
        prop_assert_eq!(
            compute_anthropometrics(weight, height, Sex::Male),
            compute_anthropometrics(weight, height, Sex::Male)
        );
        prop_assert_eq!(compute_sofa(&obs), compute_sofa(&obs));
    }
}

#[test]
fn mode_scores_have_distinct_ranges() {
    assert_eq!(SAVE_MAX, 66);
    assert_eq!(RESP_MIN, -21);
    assert!(save_tier(SAVE_MAX).0 == RiskTier::Low);
    assert!(resp_tier(RESP_MIN).0 == RiskTier::VeryHigh);
}
