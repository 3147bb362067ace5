use criterion::{criterion_group, criterion_main, Criterion};
use firemix_core::{ClientConfig, HlsFrame, NetworkingSettings, Protocol, StrandLayout};
use firemix_net::{hls_to_rgb8, DatagramTransport, Networking, Result};

struct NullTransport;

impl DatagramTransport for NullTransport {
    fn send_to(&mut self, payload: &[u8], _host: &str, _port: u16) -> Result<()> {
        std::hint::black_box(payload);
        Ok(())
    }
}

fn write_buffer_benchmark(c: &mut Criterion) {
    // 8 strands of 160 pixels, a typical scene
    let strands = StrandLayout::from_pixel_counts((0..8).map(|_| (160, true)));
    let mut frame = HlsFrame::new(strands.pixel_count());
    for (index, pixel) in frame.pixels_mut().iter_mut().enumerate() {
        *pixel = [index as f32 / 1280.0, 0.5, 1.0];
    }

    let settings = NetworkingSettings {
        legacy_packet_delay_ms: 0,
        use_pubsub: false,
        ..Default::default()
    };
    let clients = vec![
        ClientConfig::new("10.0.0.1", Protocol::Legacy),
        ClientConfig::new("10.0.0.2", Protocol::Legacy).ignoring_dimming(true),
        ClientConfig::new("10.0.0.3", Protocol::Opc),
    ];

    let mut output = Networking::with_transports(settings, Box::new(NullTransport), None);

    let mut group = c.benchmark_group("Networking");
    group.bench_function("write_buffer_dimmed", |b| {
        b.iter(|| {
            output
                .write_buffer(&frame, std::hint::black_box(0.6), &strands, &clients)
                .unwrap();
        })
    });
    group.bench_function("write_buffer_full", |b| {
        b.iter(|| {
            output
                .write_buffer(&frame, std::hint::black_box(1.0), &strands, &clients)
                .unwrap();
        })
    });
    group.bench_function("hls_to_rgb8", |b| {
        b.iter(|| hls_to_rgb8(std::hint::black_box([0.3, 0.5, 0.8]), 0.7))
    });
    group.finish();
}

criterion_group!(benches, write_buffer_benchmark);
criterion_main!(benches);
