//! Throughput benchmarks for network activation.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::prelude::*;

use cyclic_net::activation::{fast_exp, logistic_approximant_steep, logistic_steep};
use cyclic_net::{ActivationFunction, Connection, CyclicNetwork, EngineConfig, NeuronCounts};

fn random_network(
    rng: &mut StdRng,
    hidden: usize,
    connections_per_neuron: usize,
) -> CyclicNetwork {
    let counts = NeuronCounts::new(8, 4, hidden);
    let total = counts.total().unwrap();
    let first = counts.first_computed_index();

    let mut connections: Vec<_> = (0..total * connections_per_neuron)
        .map(|_| {
            Connection::new(
                rng.gen_range(0..total),
                rng.gen_range(first..total),
                rng.gen_range(-1.0..1.0),
            )
        })
        .collect();
    connections.sort_by_key(Connection::source);

    let activation_fns = (0..total)
        .map(|_| {
            *[
                ActivationFunction::LogisticApproximantSteep,
                ActivationFunction::SoftSignSteep,
                ActivationFunction::TanH,
            ]
            .choose(rng)
            .unwrap()
        })
        .collect();

    let config = EngineConfig::new().with_timesteps_per_activation(3);
    CyclicNetwork::new(connections, activation_fns, counts, config).unwrap()
}

fn bench_activate(c: &mut Criterion) {
    let mut group = c.benchmark_group("activate");

    for hidden in [16, 128, 1024].iter() {
        let mut rng = StdRng::seed_from_u64(0);
        let mut network = random_network(&mut rng, *hidden, 4);
        let inputs: Vec<f64> = (0..8).map(|_| rng.gen_range(-1.0..1.0)).collect();

        group.bench_with_input(BenchmarkId::from_parameter(hidden), hidden, |b, _| {
            b.iter(|| {
                network.inputs_mut().copy_from_slice(black_box(&inputs));
                network.activate();
                black_box(network.outputs().get(0));
            });
        });
    }
    group.finish();
}

fn bench_reset_state(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(0);
    let mut network = random_network(&mut rng, 1024, 4);

    c.bench_function("reset_state", |b| {
        b.iter(|| network.reset_state());
    });
}

fn bench_logistic(c: &mut Criterion) {
    let mut group = c.benchmark_group("logistic");

    group.bench_function("fast_exp", |b| b.iter(|| fast_exp(black_box(-1.7))));
    group.bench_function("approximant_steep", |b| {
        b.iter(|| logistic_approximant_steep(black_box(0.35)))
    });
    group.bench_function("steep", |b| b.iter(|| logistic_steep(black_box(0.35))));
    group.finish();
}

criterion_group!(benches, bench_activate, bench_reset_state, bench_logistic);
criterion_main!(benches);
