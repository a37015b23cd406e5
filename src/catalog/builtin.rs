//! Built-in catalog contents.
//!
//! Numbers follow the published part data for each component. Profile values
//! are starting points for a baseline tune, not finished calibrations.

use std::collections::BTreeMap;

use super::components::{
    CoilSpec, DwellControl, FuelPumpSpec, InjectorSpec, KnownCombo, SparkOutput, WidebandSpec,
};
use super::profiles::{AfrProfile, TimingProfile};
use super::FiringOrder;

fn afr(idle: f64, cruise: f64, acceleration: f64, wot: f64, warmup: f64, description: &str) -> AfrProfile {
    AfrProfile {
        idle,
        cruise,
        acceleration,
        wot,
        warmup,
        description: description.to_string(),
        load_curve: None,
    }
}

fn timing(
    idle: f64,
    cruise: f64,
    power: f64,
    redline: f64,
    advance_rate: &str,
    description: &str,
) -> TimingProfile {
    TimingProfile {
        idle,
        cruise,
        power,
        redline,
        advance_rate: advance_rate.to_string(),
        description: description.to_string(),
        load_curve: None,
    }
}

pub(super) fn street_performance() -> AfrProfile {
    afr(14.7, 15.0, 12.8, 12.2, 13.2, "Balanced street performance")
}

pub(super) fn conservative() -> TimingProfile {
    timing(15.0, 32.0, 28.0, 25.0, "slow", "Safe for pump gas and unknown octane")
}

pub(super) fn afr_profiles() -> BTreeMap<String, AfrProfile> {
    let mut map = BTreeMap::new();
    map.insert(
        "street".to_string(),
        afr(14.7, 15.5, 13.2, 12.5, 13.5, "Economy focused street driving"),
    );
    map.insert("street_performance".to_string(), street_performance());
    map.insert(
        "street_strip".to_string(),
        afr(14.0, 14.5, 12.5, 11.8, 13.0, "Street/strip dual purpose"),
    );
    map.insert(
        "forced_induction".to_string(),
        afr(13.8, 14.7, 12.0, 11.5, 12.8, "Safe AFRs for moderate boost on pump gas"),
    );
    map.insert(
        "e85_performance".to_string(),
        afr(13.0, 13.8, 11.8, 11.0, 12.5, "Optimized for E85 high-performance street/strip"),
    );
    map
}

pub(super) fn timing_profiles() -> BTreeMap<String, TimingProfile> {
    let mut map = BTreeMap::new();
    map.insert("conservative".to_string(), conservative());
    map.insert(
        "moderate".to_string(),
        timing(18.0, 36.0, 32.0, 28.0, "medium", "Good balance of performance and safety"),
    );
    map.insert(
        "aggressive".to_string(),
        timing(18.0, 38.0, 34.0, 30.0, "fast", "Max power on high-octane or race fuel"),
    );
    map.insert(
        "boosted".to_string(),
        timing(14.0, 30.0, 20.0, 18.0, "boost_retard", "Base map for turbo/supercharged engines"),
    );
    map
}

fn injector(size: f64, deadtime: f64, battery: f64, max_hp: u32, notes: &str) -> InjectorSpec {
    InjectorSpec {
        size_lb_hr: size,
        deadtime_ms: Some(deadtime),
        battery_correction: Some(battery),
        max_hp: Some(max_hp),
        notes: notes.to_string(),
    }
}

pub(super) fn injectors() -> BTreeMap<String, InjectorSpec> {
    let mut map = BTreeMap::new();
    map.insert(
        "Ford_19lb_Yellow".to_string(),
        injector(19.0, 1.0, 0.2, 190, "Stock Ford 5.0L injectors, yellow tops"),
    );
    map.insert(
        "Ford_24lb_Green".to_string(),
        injector(24.0, 0.8, 0.2, 240, "Ford Explorer 5.0L injectors, green tops"),
    );
    map.insert(
        "Ford_30lb_Blue".to_string(),
        injector(30.0, 0.7, 0.2, 300, "Ford Cobra injectors, blue tops"),
    );
    map.insert(
        "Bosch_42lb_Green".to_string(),
        injector(42.0, 0.6, 0.15, 420, "Bosch 42lb green giants"),
    );
    map.insert(
        "Delphi_60lb_Multec".to_string(),
        injector(60.0, 0.5, 0.1, 600, "Delphi Multec 2, EV6 style"),
    );
    map.insert(
        "Siemens_80lb".to_string(),
        injector(80.0, 0.45, 0.1, 800, "Siemens 80lb high flow"),
    );
    map.insert(
        "InjectorDynamics_1050X".to_string(),
        injector(105.0, 0.38, 0.11, 1050, "ID1050X, E85 compatible EV14"),
    );
    map.insert(
        "InjectorDynamics_2000cc".to_string(),
        injector(210.0, 0.40, 0.10, 2000, "ID2000 for high power forced induction"),
    );
    map
}

fn coil(
    coil_type: &str,
    dwell: f64,
    max_rpm: u32,
    dwell_control: DwellControl,
    notes: &str,
) -> CoilSpec {
    CoilSpec {
        coil_type: coil_type.to_string(),
        dwell_time_ms: Some(dwell),
        max_rpm: Some(max_rpm),
        spark_output: SparkOutput::GoingHigh,
        dwell_control,
        notes: notes.to_string(),
    }
}

pub(super) fn coils() -> BTreeMap<String, CoilSpec> {
    let mut map = BTreeMap::new();
    map.insert(
        "Ford_TFI".to_string(),
        coil("Distributor", 3.0, 6500, DwellControl::VoltageBased, "Stock Ford TFI"),
    );
    map.insert(
        "Ford_EDIS".to_string(),
        coil("Waste spark", 3.5, 6800, DwellControl::DwellTime, "Ford EDIS waste spark"),
    );
    map.insert(
        "GM_HEI".to_string(),
        coil("Distributor", 4.0, 6200, DwellControl::VoltageBased, "GM HEI distributor"),
    );
    map.insert(
        "LS1_COP".to_string(),
        coil("Coil on plug", 4.0, 7000, DwellControl::DwellTime, "GM LS1 coil-on-plug"),
    );
    map.insert(
        "AEM_SmartCoil".to_string(),
        coil("Coil near plug", 4.5, 9000, DwellControl::DwellTime, "AEM smart coil"),
    );
    map.insert(
        "IGN1A_Coil".to_string(),
        coil("Coil near plug", 5.0, 9500, DwellControl::DwellTime, "Honeywell IGN-1A"),
    );
    map
}

fn wideband(low_afr: f64, high_afr: f64, notes: &str) -> WidebandSpec {
    WidebandSpec {
        low_voltage: 0.0,
        high_voltage: 5.0,
        low_afr,
        high_afr,
        notes: notes.to_string(),
    }
}

pub(super) fn widebands() -> BTreeMap<String, WidebandSpec> {
    let mut map = BTreeMap::new();
    map.insert("AEM_30-4110".to_string(), wideband(10.0, 20.3, "AEM 30-4110"));
    map.insert("Innovate_LC2".to_string(), wideband(7.35, 22.39, "Innovate LC-2"));
    map.insert("14Point7_Spartan2".to_string(), wideband(9.0, 22.0, "14Point7 Spartan 2"));
    map.insert("PLX_DM6".to_string(), wideband(10.0, 20.0, "PLX DM-6 GEN4"));
    map
}

fn pump(flow: Option<f64>, pressure: Option<f64>, max_hp: u32, fuel_type: &str, notes: &str) -> FuelPumpSpec {
    FuelPumpSpec {
        flow_lph: flow,
        rated_pressure_psi: pressure,
        max_hp,
        fuel_type: fuel_type.to_string(),
        notes: notes.to_string(),
    }
}

pub(super) fn fuel_pumps() -> BTreeMap<String, FuelPumpSpec> {
    let mut map = BTreeMap::new();
    map.insert(
        "Walbro_255".to_string(),
        pump(Some(255.0), Some(43.5), 400, "gasoline", "Walbro 255"),
    );
    map.insert(
        "Walbro_450".to_string(),
        pump(Some(450.0), Some(58.0), 700, "gasoline", "Walbro 450"),
    );
    map.insert(
        "Aeromotive_340".to_string(),
        pump(Some(340.0), Some(60.0), 500, "gasoline/E85", "Aeromotive Stealth 340"),
    );
    map.insert(
        "stock".to_string(),
        pump(None, None, 200, "gasoline", "Stock fuel pump"),
    );
    map.insert(
        "Bosch_044".to_string(),
        pump(Some(300.0), Some(72.0), 600, "gasoline", "Bosch 044 external inline"),
    );
    map.insert(
        "DeatschWerks_DW400".to_string(),
        pump(Some(415.0), Some(40.0), 750, "gasoline/E85", "DW400 in-tank"),
    );
    map
}

pub(super) fn combos() -> BTreeMap<String, KnownCombo> {
    let mut map = BTreeMap::new();
    map.insert(
        "Ford_302_X303_34lb".to_string(),
        KnownCombo {
            displacement_ci: 306.0,
            cylinders: 8,
            compression_ratio: 9.0,
            engine_family: "Ford_302".to_string(),
            cam_profile: "performance".to_string(),
            injector_model: "Bosch_42lb_Green".to_string(),
            fuel_pressure_psi: 39.0,
            fuel_type: "91".to_string(),
            coil_model: "Ford_TFI".to_string(),
            rev_limit: 6500,
            afr_profile: "street_performance".to_string(),
            timing_profile: "conservative".to_string(),
            notes: "Popular street/strip combo".to_string(),
        },
    );
    map.insert(
        "Ford_302_stock_19lb".to_string(),
        KnownCombo {
            displacement_ci: 302.0,
            cylinders: 8,
            compression_ratio: 9.0,
            engine_family: "Ford_302".to_string(),
            cam_profile: "stock".to_string(),
            injector_model: "Ford_19lb_Yellow".to_string(),
            fuel_pressure_psi: 39.0,
            fuel_type: "87".to_string(),
            coil_model: "Ford_TFI".to_string(),
            rev_limit: 6000,
            afr_profile: "street".to_string(),
            timing_profile: "conservative".to_string(),
            notes: "Stock 5.0L setup".to_string(),
        },
    );
    map
}

fn order(cylinders: u8, family: &str, sequence: &[u8]) -> FiringOrder {
    FiringOrder {
        cylinders,
        family: family.to_string(),
        order: sequence.to_vec(),
    }
}

pub(super) fn firing_orders() -> Vec<FiringOrder> {
    vec![
        order(8, "Ford_302", &[1, 5, 4, 2, 6, 3, 7, 8]),
        order(8, "Ford_351W", &[1, 3, 7, 2, 6, 5, 4, 8]),
        order(8, "GM_SBC", &[1, 8, 4, 3, 6, 5, 7, 2]),
        order(8, "GM_LS", &[1, 8, 7, 2, 6, 5, 4, 3]),
        order(8, "Chrysler_LA", &[1, 8, 4, 3, 6, 5, 7, 2]),
        order(6, "GM_V6", &[1, 6, 5, 4, 3, 2]),
        order(6, "Toyota_JZ", &[1, 5, 3, 6, 2, 4]),
        order(4, "Honda_B", &[1, 3, 4, 2]),
        order(4, "Ford_2300", &[1, 3, 4, 2]),
    ]
}

pub(super) fn default_firing_orders() -> BTreeMap<u8, Vec<u8>> {
    let mut map = BTreeMap::new();
    map.insert(4, vec![1, 3, 4, 2]);
    map.insert(6, vec![1, 5, 3, 6, 2, 4]);
    map.insert(8, vec![1, 8, 4, 3, 6, 5, 7, 2]);
    map
}
