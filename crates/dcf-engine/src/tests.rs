#[cfg(test)]
mod dcf_property_tests {
    use crate::{
        compute_intrinsic_value, default_scenarios, evaluate, run_scenarios, FinancialSnapshot,
        ValuationAssumptions, ValuationError, Verdict,
    };
    use approx::assert_relative_eq;

    fn reference_snapshot() -> FinancialSnapshot {
        FinancialSnapshot::new(100_000.0, 16_000_000.0, None).unwrap()
    }

    fn assumptions(growth: f64, wacc: f64, terminal: f64, years: u32) -> ValuationAssumptions {
        ValuationAssumptions {
            fcf_growth_rate: growth,
            discount_rate: wacc,
            terminal_growth_rate: terminal,
            projection_years: years,
        }
    }

    #[test]
    fn test_reference_case_matches_closed_form() {
        let (base, shares) = (100_000.0_f64, 16_000_000.0_f64);
        let (g, r, tg, n) = (0.10_f64, 0.085_f64, 0.025_f64, 10_i32);

        // Sum of base * q^t for t = 1..n is a geometric series in q = (1+g)/(1+r).
        let q = (1.0 + g) / (1.0 + r);
        let projected = base * q * (1.0 - q.powi(n)) / (1.0 - q);
        let terminal = base * q.powi(n) * (1.0 + tg) / (r - tg);
        let expected = (projected + terminal) / shares;

        let actual =
            compute_intrinsic_value(&reference_snapshot(), &assumptions(g, r, tg, n as u32))
                .unwrap();
        assert_relative_eq!(actual, expected, max_relative = 1e-6);
        assert_relative_eq!(actual, 0.189_939_734, max_relative = 1e-6);
    }

    #[test]
    fn test_finite_across_valid_inputs() {
        let snapshots = [
            FinancialSnapshot::new(100_000.0, 16_000_000.0, None).unwrap(),
            FinancialSnapshot::new(-7_500_000.0, 2_000.0, Some(3.0)).unwrap(),
            FinancialSnapshot::new(0.0, 1.0, None).unwrap(),
            FinancialSnapshot::new(9.9e10, 1.5e10, Some(180.0)).unwrap(),
        ];
        for snapshot in &snapshots {
            for growth in [-0.5, -0.1, 0.0, 0.1, 0.5, 1.0] {
                for wacc in [0.03, 0.06, 0.085, 0.15, 0.3] {
                    for terminal in [-0.02, 0.0, 0.02, 0.029] {
                        for years in [1, 5, 10, 30] {
                            let value = compute_intrinsic_value(
                                snapshot,
                                &assumptions(growth, wacc, terminal, years),
                            )
                            .unwrap();
                            assert!(value.is_finite(), "non-finite value {}", value);
                        }
                    }
                }
            }
        }
    }

    #[test]
    fn test_monotone_in_growth() {
        let snapshot = reference_snapshot();
        let mut previous = f64::NEG_INFINITY;
        for growth in [-0.3, -0.1, 0.0, 0.05, 0.10, 0.18, 0.3, 0.6] {
            let value =
                compute_intrinsic_value(&snapshot, &assumptions(growth, 0.085, 0.025, 10)).unwrap();
            assert!(value > previous);
            previous = value;
        }
    }

    #[test]
    fn test_monotone_in_wacc() {
        let snapshot = reference_snapshot();
        let mut previous = f64::INFINITY;
        for wacc in [0.03, 0.05, 0.075, 0.085, 0.095, 0.12, 0.2] {
            let value =
                compute_intrinsic_value(&snapshot, &assumptions(0.10, wacc, 0.025, 10)).unwrap();
            assert!(value < previous);
            previous = value;
        }
    }

    #[test]
    fn test_monotone_in_terminal_growth() {
        let snapshot = reference_snapshot();
        let mut previous = f64::NEG_INFINITY;
        for terminal in [-0.01, 0.0, 0.015, 0.025, 0.04, 0.08] {
            let value =
                compute_intrinsic_value(&snapshot, &assumptions(0.10, 0.085, terminal, 10)).unwrap();
            assert!(value > previous);
            previous = value;
        }
    }

    #[test]
    fn test_wacc_equal_to_terminal_growth_is_rejected() {
        for rate in [0.0, 0.025, 0.085] {
            let result =
                compute_intrinsic_value(&reference_snapshot(), &assumptions(0.10, rate, rate, 10));
            assert!(matches!(result, Err(ValuationError::InvalidAssumptions(_))));
        }
    }

    #[test]
    fn test_verdict_partition_has_no_gap() {
        let price = 100.0;
        let mut intrinsic = 1.0;
        while intrinsic < 1_000.0 {
            let (pct, verdict) = evaluate(intrinsic, price).unwrap();
            assert_eq!(verdict == Verdict::Strong, pct > 15.0);
            assert_eq!(verdict == Verdict::None, pct <= 0.0);
            assert_eq!(verdict == Verdict::Thin, pct > 0.0 && pct <= 15.0);
            intrinsic += 0.5;
        }
    }

    #[test]
    fn test_repeat_calls_are_bit_identical() {
        let snapshot = FinancialSnapshot::new(123_456.789, 9_876.5, Some(42.0)).unwrap();
        let scenario = assumptions(0.137, 0.0912, 0.0231, 17);
        let first = compute_intrinsic_value(&snapshot, &scenario).unwrap();
        let second = compute_intrinsic_value(&snapshot, &scenario).unwrap();
        assert_eq!(first.to_bits(), second.to_bits());
    }

    #[test]
    fn test_preset_batch_increases() {
        let snapshot = FinancialSnapshot::new(100_000.0, 16_000_000.0, Some(0.2)).unwrap();
        let outcomes = run_scenarios(&snapshot, default_scenarios());

        let names: Vec<&str> = outcomes.iter().map(|o| o.name.as_str()).collect();
        assert_eq!(names, vec!["Conservative", "Base", "Aggressive"]);

        let values: Vec<f64> = outcomes.iter().filter_map(|o| o.intrinsic_value()).collect();
        assert_eq!(values.len(), 3);
        assert!(values[0] < values[1]);
        assert!(values[1] < values[2]);
    }

    #[test]
    fn test_scenario_json_shape() {
        let snapshot = FinancialSnapshot::new(100_000.0, 16_000_000.0, Some(0.17)).unwrap();
        let outcomes = run_scenarios(&snapshot, vec![("Base", ValuationAssumptions::base())]);
        let json = serde_json::to_value(&outcomes).unwrap();

        assert_eq!(json[0]["name"], "Base");
        assert_eq!(json[0]["result"]["verdict"], "THIN");
        assert!(json[0]["result"]["margin_of_safety_pct"].as_f64().unwrap() > 0.0);
    }
}
