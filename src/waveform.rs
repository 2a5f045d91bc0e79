/*!
Waveform representation and harmonic decomposition.

A [`Waveform`] is the crate's one canonical representation of a periodic
time-domain signal - flux density, voltage, current. It carries two
equal-length sample arrays plus a [`WaveformLabel`] tag identifying the
converter-topology shape that produced it, and can be decomposed into
harmonic (amplitude, phase) pairs via a real discrete Fourier transform.
*/

use uom::si::f64::MagneticFluxDensity;
use uom::si::magnetic_flux_density::tesla;

/// Tags the shape of a [`Waveform`] with the converter topology that
/// produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum WaveformLabel {
    /// Symmetric triangular wave.
    Triangular,
    /// Two-level rectangular wave.
    Rectangular,
    /// Rectangular wave with a dead-time flat segment each half period.
    RectangularWithDeadtime,
    /// Flyback primary current: a ramp from zero (or a residual level) to a
    /// peak, followed by an off interval.
    FlybackPrimary,
    /// Flyback secondary current: a mirror-image ramp down from a peak.
    FlybackSecondary,
    /// Flyback secondary current with an explicit dead-time segment.
    FlybackSecondaryWithDeadtime,
    /// Secondary-side rectangular voltage (post-rectification).
    SecondaryRectangular,
    /// Secondary-side rectangular voltage with dead time.
    SecondaryRectangularWithDeadtime,
    /// Pure sinusoid.
    Sinusoidal,
    /// Arbitrary user-supplied waveform.
    Custom,
}

/// One `(amplitude, phase)` pair of a harmonic decomposition, indexed
/// implicitly by its position in the containing `Vec` (harmonic number
/// `0` is DC).
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Harmonic {
    /// Amplitude of this harmonic, in the same unit as the parent waveform.
    pub amplitude: f64,
    /// Phase of this harmonic, in radians.
    pub phase: f64,
}

/// A periodic time-domain signal: two equal-length arrays plus a label.
///
/// `time` is assumed strictly increasing and to span exactly one period
/// (`time.last() - time.first()` is the period). Values are unitless `f64`
/// at the wire boundary - callers know from context whether `data` holds volts,
/// amperes or tesla.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Waveform {
    /// Sample timestamps, in seconds, strictly increasing.
    pub time: Vec<f64>,
    /// Sample values, same length as `time`.
    pub data: Vec<f64>,
    /// Shape tag.
    pub label: WaveformLabel,
}

impl Waveform {
    /// Builds a new waveform from equal-length `time`/`data` arrays.
    ///
    /// # Panics
    ///
    /// Panics if `time.len() != data.len()` or either is empty - this is a
    /// programmer error at the construction site, not a recoverable design
    /// failure.
    pub fn new(time: Vec<f64>, data: Vec<f64>, label: WaveformLabel) -> Self {
        assert_eq!(time.len(), data.len(), "time and data must have equal length");
        assert!(!time.is_empty(), "waveform must have at least one sample");
        return Self { time, data, label };
    }

    /// Peak-to-peak amplitude of `self.data`.
    pub fn peak_to_peak(&self) -> MagneticFluxDensity {
        let max = self.data.iter().cloned().fold(f64::MIN, f64::max);
        let min = self.data.iter().cloned().fold(f64::MAX, f64::min);
        return MagneticFluxDensity::new::<tesla>(max - min);
    }

    /// RMS value of `self.data`, trapezoidally integrated over one period.
    pub fn rms(&self) -> f64 {
        let period = self.period();
        if period <= 0.0 {
            return 0.0;
        }
        let mut integral = 0.0;
        for w in self.data.windows(2).zip(self.time.windows(2)) {
            let (v0, v1) = (w.0[0], w.0[1]);
            let dt = w.1[1] - w.1[0];
            integral += 0.5 * (v0 * v0 + v1 * v1) * dt;
        }
        return (integral / period).sqrt();
    }

    /// Arithmetic mean (DC component) of `self.data` over one period.
    pub fn mean(&self) -> f64 {
        let period = self.period();
        if period <= 0.0 {
            return 0.0;
        }
        let mut integral = 0.0;
        for w in self.data.windows(2).zip(self.time.windows(2)) {
            let (v0, v1) = (w.0[0], w.0[1]);
            let dt = w.1[1] - w.1[0];
            integral += 0.5 * (v0 + v1) * dt;
        }
        return integral / period;
    }

    /// The signal's period, i.e. the span of `self.time`.
    pub fn period(&self) -> f64 {
        return self.time.last().copied().unwrap_or(0.0) - self.time.first().copied().unwrap_or(0.0);
    }

    /// Decomposes `self` into harmonic `(amplitude, phase)` pairs via a
    /// naive (O(n·k)) discrete Fourier transform, resampling onto a uniform
    /// grid first since the stored samples need not be evenly spaced.
    ///
    /// `num_harmonics` includes the DC term at index 0.
    pub fn harmonics(&self, num_harmonics: usize) -> Vec<Harmonic> {
        let n = 512usize;
        let period = self.period();
        if period <= 0.0 || num_harmonics == 0 {
            return Vec::new();
        }
        let resampled: Vec<f64> = (0..n)
            .map(|i| self.interpolate(self.time[0] + period * i as f64 / n as f64))
            .collect();

        let mut harmonics = Vec::with_capacity(num_harmonics);
        for k in 0..num_harmonics {
            let mut re = 0.0;
            let mut im = 0.0;
            for (i, &v) in resampled.iter().enumerate() {
                let theta = 2.0 * std::f64::consts::PI * k as f64 * i as f64 / n as f64;
                re += v * theta.cos();
                im -= v * theta.sin();
            }
            let scale = if k == 0 { 1.0 / n as f64 } else { 2.0 / n as f64 };
            let amplitude = scale * (re * re + im * im).sqrt();
            let phase = im.atan2(re);
            harmonics.push(Harmonic { amplitude, phase });
        }
        return harmonics;
    }

    /// Linear interpolation of `self.data` at `t`, wrapping around the
    /// period for out-of-range `t`.
    fn interpolate(&self, t: f64) -> f64 {
        let period = self.period();
        let mut t = (t - self.time[0]) % period;
        if t < 0.0 {
            t += period;
        }
        t += self.time[0];
        match self.time.binary_search_by(|probe| probe.partial_cmp(&t).unwrap()) {
            Ok(idx) => self.data[idx],
            Err(0) => self.data[0],
            Err(idx) if idx >= self.time.len() => *self.data.last().unwrap(),
            Err(idx) => {
                let (t0, t1) = (self.time[idx - 1], self.time[idx]);
                let (v0, v1) = (self.data[idx - 1], self.data[idx]);
                let frac = (t - t0) / (t1 - t0);
                v0 + frac * (v1 - v0)
            }
        }
    }
}
