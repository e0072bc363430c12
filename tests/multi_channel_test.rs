use iir_rs::prelude::*;
use rand::distributions::{Distribution, Normal, Uniform};
use rand::rngs::StdRng;
use rand::SeedableRng;

// 5th order Butterworth low pass, fc = 1 kHz, fs = 10 kHz.
const B: [f64; 6] = [
    0.0012825810789606849,
    0.006412905394803424,
    0.012825810789606849,
    0.012825810789606849,
    0.006412905394803424,
    0.0012825810789606849,
];
const A: [f64; 6] = [
    1.0,
    -2.9754221097456828,
    3.8060181193204103,
    -2.5452528683304663,
    0.8811300754378364,
    -0.1254306221553556,
];

// Noise with short Mexican hat spikes at shared times, each channel
// shifted by a few samples.
fn spiky_channels(count: usize, len: usize) -> Vec<Vec<f64>> {
    let mut rng = StdRng::from_seed([42; 32]);
    let normal = Normal::new(0.0, 1.0);
    let times = Uniform::new(10, len - 20);
    let delays = Uniform::new_inclusive(-10_i64, 10);
    let spike_times: Vec<usize> =
        (0..len / 200).map(|_| times.sample(&mut rng)).collect();

    (0..count)
        .map(|_| {
            let mut channel: Vec<f64> =
                (0..len).map(|_| normal.sample(&mut rng)).collect();
            let delay = delays.sample(&mut rng);
            let amplitude = 5.0 - delay.abs() as f64 / 2.0;
            for &st in &spike_times {
                let center = st as i64 + delay;
                if center < 10 || center + 10 >= len as i64 {
                    continue;
                }
                for k in -10..10_i64 {
                    let t = k as f64 / 10.0;
                    let idx = (center + k) as usize;
                    channel[idx] += amplitude * (1.0 - t * t) * (-t * t).exp();
                }
            }
            channel
        })
        .collect()
}

#[test]
fn sixty_four_channels_match_single_channel_filtering() {
    let x = spiky_channels(64, 60_000);
    let output = lfilter_multi(&B, &A, &x).unwrap();

    assert_eq!(output.len(), 64);
    for (ch, out) in output.iter().enumerate() {
        assert_eq!(out.len(), 60_000);
        let alone = lfilter(&B, &A, &x[ch]).unwrap();
        assert_eq!(out, &alone, "channel {} differs", ch);
    }
}

#[test]
fn sequential_and_parallel_agree() {
    let spec = FilterSpec::new(&B, &A).unwrap();
    let x = spiky_channels(16, 4_000);

    let par = MultiChannelFilter::new(&spec, MultiChannelConfig::default())
        .process(&x)
        .unwrap();
    let seq = MultiChannelFilter::new(
        &spec,
        MultiChannelConfig::default().with_parallel(false),
    )
    .process(&x)
    .unwrap();
    assert_eq!(par, seq);
}

#[test]
fn channels_do_not_leak_into_each_other() {
    let spec = FilterSpec::new(&B, &A).unwrap();
    let filter = MultiChannelFilter::new(&spec, MultiChannelConfig::default());
    let mut x = spiky_channels(3, 1_000);
    let before = filter.process(&x).unwrap();

    for v in x[1].iter_mut() {
        *v *= -3.0;
    }
    let after = filter.process(&x).unwrap();

    assert_eq!(before[0], after[0]);
    assert_eq!(before[2], after[2]);
    assert_ne!(before[1], after[1]);
}

#[test]
fn ragged_channels_are_rejected() {
    let x = vec![vec![0.0; 100], vec![0.0; 99]];
    match lfilter_multi(&B, &A, &x) {
        Err(FilterError::InvalidArgument(_)) => (),
        other => panic!("expected InvalidArgument, got {:?}", other),
    }
}

#[test]
fn bad_coefficients_are_rejected() {
    let x = vec![vec![0.0; 10]];
    match lfilter_multi(&B, &[], &x) {
        Err(FilterError::InvalidFilter(_)) => (),
        other => panic!("expected InvalidFilter, got {:?}", other),
    }
}
