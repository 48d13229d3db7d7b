use hv_project::{FieldValue, default_form_data, default_specification, resolve};
use proptest::prelude::*;

fn field_value() -> impl Strategy<Value = FieldValue> {
    prop_oneof![
        Just(FieldValue::Empty),
        proptest::num::f64::ANY.prop_map(FieldValue::Number),
        "[ -~]{0,8}".prop_map(FieldValue::Text),
        (-1.0e6_f64..1.0e6_f64).prop_map(|v| FieldValue::Text(v.to_string())),
    ]
}

proptest! {
    #[test]
    fn resolved_specification_is_always_usable(
        hours in field_value(),
        rate in field_value(),
        maintenance in field_value(),
        capacity in field_value(),
        compare_capacity in field_value(),
        units in field_value(),
        rebate in field_value(),
        apply_rebate in any::<bool>(),
    ) {
        let mut form = default_form_data();
        form.hours_per_year = hours;
        form.electric_rate = rate;
        form.maintenance_cost_per_year = maintenance;
        form.baseline_system.capacity_tons = capacity;
        form.compare_system.capacity_tons = compare_capacity;
        form.baseline_system.units = units;
        form.rebate.amount = rebate;
        form.rebate.apply_rebate = apply_rebate;

        let spec = resolve(&form, &default_specification());

        prop_assert!(spec.hours_per_year.is_finite() && spec.hours_per_year > 0.0);
        prop_assert!(spec.electric_rate.is_finite() && spec.electric_rate > 0.0);
        prop_assert!(spec.maintenance_cost_per_year.is_finite());
        prop_assert!(spec.maintenance_cost_per_year >= 0.0);
        prop_assert!(spec.baseline_system.units >= 1);
        prop_assert_eq!(spec.compare_system.capacity_tons, spec.baseline_system.capacity_tons);
        prop_assert!(spec.rebate.amount.is_finite() && spec.rebate.amount >= 0.0);
        if !apply_rebate {
            prop_assert_eq!(spec.rebate.amount, 0.0);
        }
    }
}
