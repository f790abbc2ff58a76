//! Property-based tests for cathedral-core primitives.
//!
//! Scalar/vectorized equivalence, feedback stability and delay integrity
//! over randomized lengths, gains and input blocks.

use cathedral_core::{AllpassFilter, CombFilter, DelayLine, ProcessPath};
use proptest::prelude::*;

const SAMPLE_RATE: f32 = 48000.0;

fn block(len: usize) -> impl Strategy<Value = Vec<f32>> {
    prop::collection::vec(-1.0f32..=1.0f32, len)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Both comb paths produce the same samples, including across block
    /// boundaries that split a lane group.
    #[test]
    fn comb_paths_equivalent(
        delay in 1usize..600,
        feedback in 0.0f32..0.99,
        damping_hz in 20.0f32..24000.0,
        split in 0usize..700,
        input in block(700),
    ) {
        let mut scalar = CombFilter::new(600, SAMPLE_RATE);
        let mut vector = CombFilter::new(600, SAMPLE_RATE);
        for comb in [&mut scalar, &mut vector] {
            comb.set_delay_samples(delay);
            comb.set_feedback(feedback);
            comb.set_damping_hz(damping_hz);
        }

        let mut out_s = vec![0.0; input.len()];
        let mut out_v = vec![0.0; input.len()];
        let (head, tail) = input.split_at(split);
        let (out_s_head, out_s_tail) = out_s.split_at_mut(split);
        let (out_v_head, out_v_tail) = out_v.split_at_mut(split);
        scalar.process_block(head, out_s_head, ProcessPath::Scalar);
        scalar.process_block(tail, out_s_tail, ProcessPath::Scalar);
        vector.process_block(head, out_v_head, ProcessPath::Vectorized);
        vector.process_block(tail, out_v_tail, ProcessPath::Vectorized);

        for (i, (a, b)) in out_s.iter().zip(&out_v).enumerate() {
            prop_assert!((a - b).abs() < 1e-4, "sample {}: {} vs {}", i, a, b);
        }
    }

    /// Both allpass paths produce the same samples.
    #[test]
    fn allpass_paths_equivalent(
        delay in 1usize..300,
        gain in -0.99f32..0.99,
        input in block(517),
    ) {
        let mut scalar = AllpassFilter::new(300);
        let mut vector = AllpassFilter::new(300);
        for ap in [&mut scalar, &mut vector] {
            ap.set_delay_samples(delay);
            ap.set_gain(gain);
        }

        let mut out_s = input.clone();
        let mut out_v = input;
        scalar.process_block_inplace(&mut out_s, ProcessPath::Scalar);
        vector.process_block_inplace(&mut out_v, ProcessPath::Vectorized);

        for (i, (a, b)) in out_s.iter().zip(&out_v).enumerate() {
            prop_assert!((a - b).abs() < 1e-4, "sample {}: {} vs {}", i, a, b);
        }
    }

    /// Any feedback the setter accepts keeps the comb bounded.
    #[test]
    fn comb_stays_bounded(
        delay in 8usize..2000,
        feedback in -5.0f32..5.0,
        damping_hz in 0.0f32..40000.0,
    ) {
        let mut comb = CombFilter::new(2000, SAMPLE_RATE);
        comb.set_delay_samples(delay);
        comb.set_feedback(feedback);
        comb.set_damping_hz(damping_hz);

        comb.process(1.0);
        for _ in 0..48_000 {
            let out = comb.process(0.0);
            // Unit impulse with |g| <= 0.99 can never exceed 1
            prop_assert!(out.is_finite() && out.abs() <= 1.0, "out = {}", out);
        }
    }

    /// A delay line returns exactly what was written, `len` steps later.
    #[test]
    fn delay_line_integrity(
        capacity in 1usize..512,
        len in 0usize..1024,
        input in block(1024),
    ) {
        let mut line = DelayLine::new(capacity);
        line.set_active_length(len);
        let active = line.active_length();
        prop_assert!(active >= 1 && active <= capacity);

        for (n, &x) in input.iter().enumerate() {
            let out = line.step(x);
            let expected = if n >= active { input[n - active] } else { 0.0 };
            prop_assert_eq!(out, expected);
        }
    }
}
