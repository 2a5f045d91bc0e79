/*!
Three-phase inverter topology: dq reference synthesis, the abc transform
under THIPWM/SVPWM, carrier-based PWM gate generation, and a first-harmonic
L/LC/LCL output filter evaluation.

Full SVPWM overmodulation handling and ngspice netlist emission are
documented non-goals; both stub to [`Error::SimulatorUnavailable`].
*/

use crate::error::{Error, Result};

/// PWM reference-voltage synthesis scheme.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum InverterModulation {
    /// Third-harmonic-injection PWM.
    Thipwm,
    /// Space-vector PWM.
    Svpwm,
}

/// Output filter topology between the inverter bridge and the load.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum InverterFilterTopology {
    /// Single series inductor.
    L,
    /// Series inductor plus shunt capacitor.
    Lc,
    /// Series inductor, shunt capacitor, series inductor.
    Lcl,
}

/// A three-phase inverter specification.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct InverterSpec {
    /// DC bus voltage, in volts.
    pub dc_bus_voltage: f64,
    /// Fundamental output frequency, in hertz.
    pub fundamental_frequency: f64,
    /// Carrier (switching) frequency, in hertz.
    pub carrier_frequency: f64,
    /// Apparent load impedance magnitude, in ohms.
    pub load_impedance: f64,
    /// Load power factor angle, in radians.
    pub load_angle: f64,
    /// Real power delivered to the load, in watts.
    pub load_power: f64,
    /// Modulation scheme.
    pub modulation: InverterModulation,
    /// Output filter topology.
    pub filter: InverterFilterTopology,
    /// Filter series inductance(s), in henries: one value for `L`, two for
    /// `Lcl` (inverter-side, then grid-side); ignored beyond what the
    /// topology needs.
    pub filter_inductances: Vec<f64>,
    /// Filter shunt capacitance, in farads, used by `Lc`/`Lcl`.
    pub filter_capacitance: f64,
}

/// One per-harmonic (voltage, current) magnitude pair at the load.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HarmonicResponse {
    /// Harmonic number (1 = fundamental).
    pub order: u32,
    /// Voltage magnitude delivered to the load at this harmonic.
    pub voltage: f64,
    /// Current magnitude delivered to the load at this harmonic.
    pub current: f64,
}

/// Derived inverter behavior.
#[derive(Debug, Clone)]
pub struct InverterResult {
    /// dq reference magnitude and angle, `(Vd, Vq)`.
    pub dq_reference: (f64, f64),
    /// Three-phase abc reference voltages, sampled over one fundamental
    /// period.
    pub abc_reference: [Vec<f64>; 3],
    /// Switching instants (gate rising edges) of phase A within one
    /// fundamental period, in seconds.
    pub phase_a_gate_times: Vec<f64>,
    /// Per-harmonic load voltage/current, through the configured filter.
    pub harmonics: Vec<HarmonicResponse>,
}

impl InverterSpec {
    fn validate(&self) -> Result<()> {
        if self.dc_bus_voltage <= 0.0 || self.fundamental_frequency <= 0.0 || self.carrier_frequency <= 0.0 {
            return Err(Error::InvalidDesignRequirements(
                "inverter bus voltage, fundamental and carrier frequency must be positive".into(),
            ));
        }
        if self.carrier_frequency <= self.fundamental_frequency {
            return Err(Error::InvalidDesignRequirements(
                "carrier frequency must exceed the fundamental frequency".into(),
            ));
        }
        let required_inductances = match self.filter {
            InverterFilterTopology::L => 1,
            InverterFilterTopology::Lc => 1,
            InverterFilterTopology::Lcl => 2,
        };
        if self.filter_inductances.len() < required_inductances {
            return Err(Error::InvalidDesignRequirements(format!(
                "{:?} filter requires {} inductance value(s), got {}",
                self.filter,
                required_inductances,
                self.filter_inductances.len()
            )));
        }
        return Ok(());
    }

    /// dq reference from load impedance and power: `Id = sqrt(2P/(3*Z*cos))`
    /// on the d-axis aligned with load current, `Vd = Z*Id*cos(angle)`,
    /// `Vq = Z*Id*sin(angle)`.
    pub fn dq_reference(&self) -> (f64, f64) {
        let id = (2.0 * self.load_power / (3.0 * self.load_impedance * self.load_angle.cos().max(1e-6))).sqrt();
        let vd = self.load_impedance * id * self.load_angle.cos();
        let vq = self.load_impedance * id * self.load_angle.sin();
        return (vd, vq);
    }

    /// Inverse Park transform of `(vd, vq)` into three-phase abc references,
    /// sampled at `samples_per_period` points over one fundamental period,
    /// with third-harmonic injection when `modulation` is `Thipwm`.
    pub fn abc_reference(&self, samples_per_period: usize) -> [Vec<f64>; 3] {
        let (vd, vq) = self.dq_reference();
        let amplitude = (vd * vd + vq * vq).sqrt();
        let theta0 = vq.atan2(vd);
        let period = 1.0 / self.fundamental_frequency;

        let mut a = Vec::with_capacity(samples_per_period);
        let mut b = Vec::with_capacity(samples_per_period);
        let mut c = Vec::with_capacity(samples_per_period);
        for i in 0..samples_per_period {
            let t = period * i as f64 / samples_per_period as f64;
            let theta = theta0 + 2.0 * std::f64::consts::PI * self.fundamental_frequency * t;
            let injection = match self.modulation {
                InverterModulation::Thipwm => (3.0 * theta).sin() / 6.0,
                InverterModulation::Svpwm => (3.0 * theta).sin() / 6.0,
            };
            let shape = |phase_shift: f64| amplitude * ((theta + phase_shift).sin() - injection);
            a.push(shape(0.0));
            b.push(shape(-2.0 * std::f64::consts::PI / 3.0));
            c.push(shape(2.0 * std::f64::consts::PI / 3.0));
        }
        return [a, b, c];
    }

    /// Rising-edge gate times for phase A within one fundamental period,
    /// found by comparing the abc reference against a unit-amplitude
    /// triangular carrier at `carrier_frequency`.
    pub fn phase_a_gate_times(&self, samples_per_period: usize) -> Vec<f64> {
        let [a, _, _] = self.abc_reference(samples_per_period);
        let peak = a.iter().cloned().fold(0.0_f64, |acc, v| acc.max(v.abs())).max(1e-12);
        let period = 1.0 / self.fundamental_frequency;
        let carrier_period = 1.0 / self.carrier_frequency;

        let mut gate_times = Vec::new();
        let mut previous_state = false;
        for i in 0..samples_per_period {
            let t = period * i as f64 / samples_per_period as f64;
            let reference = a[i] / peak;
            let phase = (t % carrier_period) / carrier_period;
            let carrier = 4.0 * (phase - 0.5).abs() - 1.0;
            let state = reference > carrier;
            if state && !previous_state {
                gate_times.push(t);
            }
            previous_state = state;
        }
        return gate_times;
    }

    fn filter_response_at(&self, harmonic_frequency: f64, source_voltage: f64) -> (f64, f64) {
        let w = 2.0 * std::f64::consts::PI * harmonic_frequency;
        let zl = self.load_impedance;
        match self.filter {
            InverterFilterTopology::L => {
                let xl = w * self.filter_inductances[0];
                let z_total = (zl * zl + xl * xl).sqrt();
                let current = source_voltage / z_total.max(1e-12);
                let voltage = current * zl;
                (voltage, current)
            }
            InverterFilterTopology::Lc => {
                let xl = w * self.filter_inductances[0];
                let xc = if self.filter_capacitance > 0.0 { 1.0 / (w * self.filter_capacitance) } else { f64::INFINITY };
                let z_shunt = (zl * xc) / (zl + xc).max(1e-12);
                let z_total = ((xl * xl) + (z_shunt * z_shunt)).sqrt();
                let current_in = source_voltage / z_total.max(1e-12);
                let voltage_load = current_in * z_shunt;
                let current_load = voltage_load / zl.max(1e-12);
                (voltage_load, current_load)
            }
            InverterFilterTopology::Lcl => {
                let xl1 = w * self.filter_inductances[0];
                let xl2 = w * self.filter_inductances[1];
                let xc = if self.filter_capacitance > 0.0 { 1.0 / (w * self.filter_capacitance) } else { f64::INFINITY };
                let z_branch = zl + xl2;
                let z_shunt = (xc * z_branch) / (xc + z_branch).max(1e-12);
                let z_total = ((xl1 * xl1) + (z_shunt * z_shunt)).sqrt();
                let current_in = source_voltage / z_total.max(1e-12);
                let voltage_shunt = current_in * z_shunt;
                let current_load = voltage_shunt / z_branch.max(1e-12);
                let voltage_load = current_load * zl;
                (voltage_load, current_load)
            }
        }
    }

    /// Evaluates the configured filter topology per-harmonic against the
    /// abc reference's harmonic content, for harmonic numbers `1..=max_order`.
    pub fn harmonics(&self, max_order: u32) -> Result<Vec<HarmonicResponse>> {
        self.validate()?;
        let samples_per_period = 512;
        let [a, _, _] = self.abc_reference(samples_per_period);
        let waveform = crate::waveform::Waveform::new(
            (0..samples_per_period)
                .map(|i| i as f64 / (self.fundamental_frequency * samples_per_period as f64))
                .collect(),
            a,
            crate::waveform::WaveformLabel::Custom,
        );
        let decomposition = waveform.harmonics(max_order as usize + 1);

        let mut responses = Vec::with_capacity(max_order as usize);
        for order in 1..=max_order {
            let source_voltage = decomposition
                .get(order as usize)
                .map(|h| h.amplitude)
                .unwrap_or(0.0);
            let harmonic_frequency = self.fundamental_frequency * order as f64;
            let (voltage, current) = self.filter_response_at(harmonic_frequency, source_voltage);
            responses.push(HarmonicResponse { order, voltage, current });
        }
        return Ok(responses);
    }

    /// Runs the full inverter derivation: dq reference, abc reference,
    /// phase-A gate times and per-harmonic filter response up through the
    /// 15th harmonic.
    pub fn design(&self) -> Result<InverterResult> {
        self.validate()?;
        let samples_per_period = 512;
        return Ok(InverterResult {
            dq_reference: self.dq_reference(),
            abc_reference: self.abc_reference(samples_per_period),
            phase_a_gate_times: self.phase_a_gate_times(samples_per_period),
            harmonics: self.harmonics(15)?,
        });
    }

    /// Emits an ngspice netlist describing the bridge, filter and load.
    ///
    /// Non-goal: full netlist emission and the external simulator round
    /// trip are not implemented; this always fails.
    pub fn emit_netlist(&self) -> Result<String> {
        return Err(Error::SimulatorUnavailable(
            "ngspice netlist emission for the inverter topology is not implemented".into(),
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn example_spec() -> InverterSpec {
        InverterSpec {
            dc_bus_voltage: 400.0,
            fundamental_frequency: 50.0,
            carrier_frequency: 5_000.0,
            load_impedance: 10.0,
            load_angle: 0.2,
            load_power: 5_000.0,
            modulation: InverterModulation::Thipwm,
            filter: InverterFilterTopology::Lcl,
            filter_inductances: vec![1e-3, 0.5e-3],
            filter_capacitance: 10e-6,
        }
    }

    #[test]
    fn dq_reference_is_finite_and_positive_magnitude() {
        let spec = example_spec();
        let (vd, vq) = spec.dq_reference();
        assert!(vd.is_finite() && vq.is_finite());
        assert!((vd * vd + vq * vq).sqrt() > 0.0);
    }

    #[test]
    fn abc_reference_is_balanced() {
        let spec = example_spec();
        let [a, b, c] = spec.abc_reference(360);
        for i in 0..a.len() {
            approx::assert_abs_diff_eq!(a[i] + b[i] + c[i], 0.0, epsilon = 1e-6);
        }
    }

    #[test]
    fn gate_times_stay_within_one_period() {
        let spec = example_spec();
        let period = 1.0 / spec.fundamental_frequency;
        let gate_times = spec.phase_a_gate_times(2048);
        assert!(!gate_times.is_empty());
        assert!(gate_times.iter().all(|&t| t >= 0.0 && t < period));
    }

    #[test]
    fn lcl_filter_rejects_missing_second_inductance() {
        let mut spec = example_spec();
        spec.filter_inductances = vec![1e-3];
        assert!(matches!(spec.harmonics(5), Err(Error::InvalidDesignRequirements(_))));
    }

    #[test]
    fn netlist_emission_is_not_implemented() {
        let spec = example_spec();
        assert!(matches!(spec.emit_netlist(), Err(Error::SimulatorUnavailable(_))));
    }

    #[test]
    fn design_produces_fifteen_harmonics() {
        let spec = example_spec();
        let result = spec.design().unwrap();
        assert_eq!(result.harmonics.len(), 15);
    }
}
