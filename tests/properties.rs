use proptest::prelude::*;
use srcset_widths::breakpoints::aggregate;
use srcset_widths::config::{RenderConfig, ViewportContext};
use srcset_widths::css::calc::reduce_to_number;
use srcset_widths::css::units::{BaseViewport, LengthUnit, resolve_unit};
use srcset_widths::imaging::{
    EstimatedImage, ImageSource, StepPlan, distribute_widths, get_variants,
};

fn unit_strategy() -> impl Strategy<Value = LengthUnit> {
    prop_oneof![
        Just(LengthUnit::Px),
        Just(LengthUnit::Rem),
        Just(LengthUnit::Em),
        Just(LengthUnit::Vw),
        Just(LengthUnit::Vh),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig { cases: 512, .. ProptestConfig::default() })]

    #[test]
    fn units_scale_linearly(
        unit in unit_strategy(),
        a in 0.0f64..10_000.0,
        b in 0.0f64..10_000.0,
        width in 1.0f64..4000.0,
    ) {
        let base = BaseViewport::with_width(width);
        let sum = resolve_unit(a + b, unit, base, 16.0);
        let parts = resolve_unit(a, unit, base, 16.0) + resolve_unit(b, unit, base, 16.0);
        prop_assert!((sum - parts).abs() <= 1e-6 * sum.abs().max(1.0));
    }

    #[test]
    fn calc_adds_pixel_lengths(a in 0u16.., b in 0u16..) {
        let expression = format!("calc({a}px + {b}px)");
        let value = reduce_to_number(&expression, BaseViewport::with_width(1000.0), 16.0);
        prop_assert_eq!(value, Some(f64::from(a) + f64::from(b)));
    }

    #[test]
    fn explicit_widths_pass_through_sorted(
        explicit in prop::collection::vec(1u32..10_000, 1..12),
        max_width in 1u32..10_000,
    ) {
        let plan = StepPlan { max_width, min_width: 1.0, size_diff: 1000, max_steps: 5 };
        let widths = distribute_widths(&plan, &explicit, |_| -> Result<u64, ()> {
            panic!("measured despite explicit widths")
        })
        .unwrap();

        let mut expected = explicit.clone();
        expected.sort_unstable_by(|a, b| b.cmp(a));
        prop_assert_eq!(widths, expected);
    }

    #[test]
    fn base_level_never_upscales(
        width in 1u32..6000,
        filesize in 1u64..5_000_000,
        max_steps in 1i64..=10,
        size_diff in 1i64..200_000,
    ) {
        let config = RenderConfig::new("100vw")
            .with_max_steps(max_steps)
            .with_size_diff(size_diff)
            .with_high_res(1);
        let source = EstimatedImage::new("photo", width, filesize);
        let variants = get_variants(&source, &config, &ViewportContext::default()).unwrap();

        prop_assert!(!variants.is_empty());
        prop_assert!(variants.iter().all(|v| v.width() <= width));
    }

    #[test]
    fn aggregate_never_returns_an_empty_map(sizes in "\\PC{0,60}") {
        let viewport = ViewportContext::default();
        prop_assert!(!aggregate(&sizes, &viewport).is_empty());
    }

    #[test]
    fn aggregate_of_plausible_rules_stays_in_viewport(
        bound in 200u32..2000,
        vw in 1u32..=100,
        px in 1u32..3000,
        use_max in any::<bool>(),
    ) {
        let feature = if use_max { "max-width" } else { "min-width" };
        let sizes = format!("({feature}: {bound}px) {vw}vw, {px}px");
        let viewport = ViewportContext::default();
        let map = aggregate(&sizes, &viewport);

        for point in map.iter() {
            prop_assert!(point.viewport >= i64::from(viewport.min_width()));
            prop_assert!(point.viewport <= i64::from(viewport.max_width()));
        }
    }
}
