//! Manufacturing cost estimation
//!
//! Each [`CostModel`] has its own formula. Rates come from the process table
//! under the requested process name; every rate a formula needs has a
//! literal default for when the table does not carry it. Intermediate values
//! are kept unrounded until the estimate is assembled.

use rayon::prelude::*;
use std::num::NonZeroU32;

use crate::core::round::{money, round_to};
use crate::entities::{BoundingBox, CostBreakdown, CostComponent, CostEstimate, Design, ProcessComparison};
use crate::reference::{CostModel, ProcessRates, ReferenceTables};

/// Unrounded result of one cost formula
struct Costing {
    unit_cost: f64,
    lines: Vec<(CostComponent, f64)>,
    print_time_hours: Option<f64>,
    mold_cost_total: Option<f64>,
}

/// Physical quantities shared by every formula
#[derive(Debug, Clone, Copy)]
struct Stock {
    volume_cm3: f64,
    mass_kg: f64,
    price_per_kg: f64,
}

impl Stock {
    fn material_cost(&self) -> f64 {
        self.mass_kg * self.price_per_kg
    }
}

/// CNC quantity discount multiplier; the highest reached tier wins
pub fn volume_discount(quantity: NonZeroU32) -> f64 {
    match quantity.get() {
        q if q >= 1000 => 0.70,
        q if q >= 500 => 0.80,
        q if q >= 100 => 0.90,
        _ => 1.0,
    }
}

fn lead_time_days(model: CostModel) -> &'static str {
    match model {
        CostModel::CncMilling => "5-7",
        CostModel::AdditivePrinting => "3-5",
        CostModel::InjectionMolding => "14-21 (including tooling)",
    }
}

fn best_for(model: CostModel) -> &'static str {
    match model {
        CostModel::CncMilling => "Low to medium volume (1-1000 units)",
        CostModel::AdditivePrinting => "Prototypes and low volume (<100 units)",
        CostModel::InjectionMolding => "High volume (>1000 units)",
    }
}

fn cnc_milling(stock: Stock, rates: &ProcessRates, quantity: NonZeroU32) -> Costing {
    let material = stock.material_cost();
    let machining_minutes =
        rates.time_per_cm3.unwrap_or(0.5) * stock.volume_cm3 + rates.setup_time.unwrap_or(15.0);
    let labor = machining_minutes / 60.0 * rates.labor_rate.unwrap_or(16.0);
    let tooling = rates.tooling_base.unwrap_or(50.0) / f64::from(quantity.get());

    let direct = material + labor + tooling;
    let overhead = direct * rates.overhead_rate.unwrap_or(0.25);
    let undiscounted = direct + overhead;
    let unit_cost = undiscounted * volume_discount(quantity);

    let mut lines = vec![
        (CostComponent::Material, material),
        (CostComponent::Labor, labor),
        (CostComponent::ToolingAmortized, tooling),
        (CostComponent::Overhead, overhead),
    ];
    if unit_cost < undiscounted {
        lines.push((CostComponent::VolumeDiscount, unit_cost - undiscounted));
    }

    Costing {
        unit_cost,
        lines,
        print_time_hours: None,
        mold_cost_total: None,
    }
}

fn additive_printing(stock: Stock, rates: &ProcessRates) -> Costing {
    let material = stock.material_cost() * rates.support_factor.unwrap_or(1.4);
    let print_hours = rates.time_per_cm3.unwrap_or(2.0) * stock.volume_cm3 / 60.0;
    let machine = print_hours * rates.machine_rate.unwrap_or(8.0);

    let direct = material + machine;
    let overhead = direct * rates.overhead_rate.unwrap_or(0.15);

    Costing {
        unit_cost: direct + overhead,
        lines: vec![
            (CostComponent::Material, material),
            (CostComponent::MachineTime, machine),
            (CostComponent::Overhead, overhead),
        ],
        print_time_hours: Some(print_hours),
        mold_cost_total: None,
    }
}

fn injection_molding(stock: Stock, rates: &ProcessRates, quantity: NonZeroU32) -> Costing {
    let material = stock.material_cost();
    let parts_per_hour = 3600.0 / rates.cycle_time.unwrap_or(30.0);
    let labor = rates.labor_rate.unwrap_or(12.0) / parts_per_hour;
    let mold_cost = rates.mold_cost.unwrap_or(5000.0);
    let mold = mold_cost / f64::from(quantity.get());

    let direct = material + labor + mold;
    let overhead = direct * rates.overhead_rate.unwrap_or(0.20);

    Costing {
        unit_cost: direct + overhead,
        lines: vec![
            (CostComponent::Material, material),
            (CostComponent::Labor, labor),
            (CostComponent::MoldAmortized, mold),
            (CostComponent::Overhead, overhead),
        ],
        print_time_hours: None,
        mold_cost_total: Some(mold_cost),
    }
}

/// Per-process cost calculator
#[derive(Debug, Clone, Copy)]
pub struct CostEstimator<'a> {
    tables: &'a ReferenceTables,
}

impl<'a> CostEstimator<'a> {
    pub fn new(tables: &'a ReferenceTables) -> Self {
        Self { tables }
    }

    /// Estimate the cost of making `quantity` parts by the design's process
    pub fn estimate(&self, design: &Design, bbox: &BoundingBox, quantity: NonZeroU32) -> CostEstimate {
        let stock = self.stock(design, bbox);
        let rates = self.tables.process_rates(&design.process);
        let model = CostModel::for_process(&design.process);

        tracing::trace!(
            process = %design.process,
            %model,
            volume_cm3 = stock.volume_cm3,
            mass_kg = stock.mass_kg,
            "costing design"
        );

        let costing = match model {
            CostModel::CncMilling => cnc_milling(stock, &rates, quantity),
            CostModel::AdditivePrinting => additive_printing(stock, &rates),
            CostModel::InjectionMolding => injection_molding(stock, &rates, quantity),
        };

        assemble(model, costing, stock, quantity)
    }

    /// Estimate every costed process and rank them by unit cost
    pub fn compare(&self, design: &Design, bbox: &BoundingBox, quantity: NonZeroU32) -> ProcessComparison {
        let estimates: Vec<CostEstimate> = CostModel::ALL
            .par_iter()
            .map(|model| self.estimate(&design.with_process(model.process_name()), bbox, quantity))
            .collect();
        ProcessComparison::ranked(estimates)
    }

    fn stock(&self, design: &Design, bbox: &BoundingBox) -> Stock {
        let volume_cm3 = bbox.volume_cm3();
        Stock {
            volume_cm3,
            mass_kg: volume_cm3 * self.tables.density(&design.material) / 1000.0,
            price_per_kg: self.tables.price_per_kg(&design.material),
        }
    }
}

fn assemble(model: CostModel, costing: Costing, stock: Stock, quantity: NonZeroU32) -> CostEstimate {
    let breakdown: CostBreakdown = costing
        .lines
        .into_iter()
        .map(|(component, amount)| (component, money(amount)))
        .collect();

    CostEstimate {
        process: model.process_name().to_string(),
        unit_cost: money(costing.unit_cost),
        total_cost: money(costing.unit_cost * f64::from(quantity.get())),
        breakdown,
        lead_time_days: lead_time_days(model).to_string(),
        best_for: best_for(model).to_string(),
        quantity,
        mass_kg: round_to(stock.mass_kg, 3),
        print_time_hours: costing.print_time_hours.map(|h| round_to(h, 1)),
        mold_cost_total: costing.mold_cost_total.map(money),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reference::ReferenceOverrides;
    use std::path::Path;

    fn qty(n: u32) -> NonZeroU32 {
        NonZeroU32::new(n).unwrap()
    }

    fn design(material: &str, process: &str) -> Design {
        Design {
            material: material.to_string(),
            process: process.to_string(),
            ..Design::default()
        }
    }

    // 100 cm³ of stock
    fn bbox() -> BoundingBox {
        BoundingBox::new(100.0, 100.0, 10.0)
    }

    #[test]
    fn test_cnc_reference_scenario() {
        let tables = ReferenceTables::builtin();
        let estimate = CostEstimator::new(&tables).estimate(
            &design("aluminum_6061_t6", "cnc_milling"),
            &bbox(),
            qty(100),
        );

        assert_eq!(estimate.process, "cnc_milling");
        assert_eq!(estimate.mass_kg, 0.27);
        assert_eq!(estimate.component(CostComponent::Material), Some(1.3));
        assert_eq!(estimate.component(CostComponent::Labor), Some(17.33));
        assert_eq!(estimate.component(CostComponent::ToolingAmortized), Some(0.5));
        assert_eq!(estimate.component(CostComponent::Overhead), Some(4.78));
        assert_eq!(estimate.component(CostComponent::VolumeDiscount), Some(-2.39));
        assert_eq!(estimate.unit_cost, 21.52);
        assert_eq!(estimate.total_cost, 2152.05);
        assert_eq!(estimate.lead_time_days, "5-7");
        assert_eq!(estimate.quantity.get(), 100);
    }

    #[test]
    fn test_cnc_thousand_is_seventy_percent() {
        let tables = ReferenceTables::builtin();
        let estimator = CostEstimator::new(&tables);
        let d = design("steel_mild", "cnc_milling");

        // tooling amortization differs with quantity, so compare the
        // formula at one quantity against the tier multiplier
        let stock = estimator.stock(&d, &bbox());
        let rates = tables.process_rates("cnc_milling");
        let costing = cnc_milling(stock, &rates, qty(1000));
        let undiscounted: f64 = costing
            .lines
            .iter()
            .filter(|(c, _)| *c != CostComponent::VolumeDiscount)
            .map(|(_, v)| v)
            .sum();
        assert!((costing.unit_cost - undiscounted * 0.70).abs() < 1e-9);
    }

    #[test]
    fn test_discount_tiers() {
        assert_eq!(volume_discount(qty(1)), 1.0);
        assert_eq!(volume_discount(qty(99)), 1.0);
        assert_eq!(volume_discount(qty(100)), 0.90);
        assert_eq!(volume_discount(qty(499)), 0.90);
        assert_eq!(volume_discount(qty(500)), 0.80);
        assert_eq!(volume_discount(qty(1000)), 0.70);
        assert_eq!(volume_discount(qty(50_000)), 0.70);
    }

    #[test]
    fn test_no_discount_line_below_tier() {
        let tables = ReferenceTables::builtin();
        let estimate = CostEstimator::new(&tables).estimate(
            &design("aluminum_6061_t6", "cnc_milling"),
            &bbox(),
            qty(10),
        );
        assert!(estimate.component(CostComponent::VolumeDiscount).is_none());
    }

    #[test]
    fn test_3d_printing_formula() {
        let tables = ReferenceTables::builtin();
        let estimate = CostEstimator::new(&tables).estimate(
            &design("plastic_abs", "3d_printing"),
            &bbox(),
            qty(100),
        );
        // mass 0.105kg × $3 × 1.4 = 0.441; 200 min → 3.333h × $8 = 26.667
        assert_eq!(estimate.mass_kg, 0.105);
        assert_eq!(estimate.component(CostComponent::Material), Some(0.44));
        assert_eq!(estimate.component(CostComponent::MachineTime), Some(26.67));
        assert_eq!(estimate.print_time_hours, Some(3.3));
        assert_eq!(estimate.unit_cost, 31.17);
        assert_eq!(estimate.lead_time_days, "3-5");
        assert!(estimate.mold_cost_total.is_none());
    }

    #[test]
    fn test_injection_molding_formula() {
        let tables = ReferenceTables::builtin();
        let estimate = CostEstimator::new(&tables).estimate(
            &design("plastic_abs", "injection_molding"),
            &bbox(),
            qty(1000),
        );
        // 0.315 + 0.1 + 5.0 = 5.415 direct, ×1.2
        assert_eq!(estimate.component(CostComponent::Labor), Some(0.1));
        assert_eq!(estimate.component(CostComponent::MoldAmortized), Some(5.0));
        assert_eq!(estimate.unit_cost, 6.5);
        assert_eq!(estimate.mold_cost_total, Some(5000.0));
        assert_eq!(estimate.best_for, "High volume (>1000 units)");
    }

    #[test]
    fn test_unknown_process_costs_as_cnc() {
        let tables = ReferenceTables::builtin();
        let estimator = CostEstimator::new(&tables);
        let unknown = estimator.estimate(&design("aluminum_6061_t6", "laser_cutting"), &bbox(), qty(100));
        let cnc = estimator.estimate(&design("aluminum_6061_t6", "cnc_milling"), &bbox(), qty(100));
        assert_eq!(unknown, cnc);
    }

    #[test]
    fn test_unknown_material_uses_fallbacks() {
        let tables = ReferenceTables::builtin();
        let estimate = CostEstimator::new(&tables).estimate(
            &design("unobtainium", "cnc_milling"),
            &bbox(),
            qty(100),
        );
        // 0.27kg × $5.00
        assert_eq!(estimate.component(CostComponent::Material), Some(1.35));
    }

    #[test]
    fn test_compare_is_sorted() {
        let tables = ReferenceTables::builtin();
        let estimator = CostEstimator::new(&tables);
        for n in [1, 10, 100, 1000, 100_000] {
            let comparison = estimator.compare(&design("plastic_abs", "cnc_milling"), &bbox(), qty(n));
            assert_eq!(comparison.len(), 3);
            let costs: Vec<f64> = comparison.iter().map(|e| e.unit_cost).collect();
            assert!(costs.windows(2).all(|w| w[0] <= w[1]), "unsorted at {}: {:?}", n, costs);
        }
    }

    #[test]
    fn test_compare_covers_each_process_once() {
        let tables = ReferenceTables::builtin();
        let comparison = CostEstimator::new(&tables).compare(
            &design("aluminum_6061_t6", "sheet_metal"),
            &bbox(),
            qty(100),
        );
        let mut processes: Vec<_> = comparison.iter().map(|e| e.process.as_str()).collect();
        processes.sort_unstable();
        assert_eq!(processes, vec!["3d_printing", "cnc_milling", "injection_molding"]);
    }

    #[test]
    fn test_overridden_prices_change_estimate() {
        let overrides = ReferenceOverrides::from_yaml_str(
            "materials:\n  aluminum_6061_t6:\n    price_per_kg: 10.0\n    density: 2.70\n",
            Path::new("test.yaml"),
        )
        .unwrap();
        let tables = ReferenceTables::builtin().with_overrides(overrides);
        let estimate = CostEstimator::new(&tables).estimate(
            &design("aluminum_6061_t6", "cnc_milling"),
            &bbox(),
            qty(100),
        );
        assert_eq!(estimate.component(CostComponent::Material), Some(2.7));
    }

    #[test]
    fn test_sheet_metal_rates_feed_cnc_formula() {
        let tables = ReferenceTables::builtin();
        let estimate = CostEstimator::new(&tables).estimate(
            &design("aluminum_6061_t6", "sheet_metal"),
            &bbox(),
            qty(1),
        );
        // labor at $14/h: 65 min → 15.17
        assert_eq!(estimate.component(CostComponent::Labor), Some(15.17));
        assert_eq!(estimate.process, "cnc_milling");
    }
}
