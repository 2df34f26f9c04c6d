//! city_dispatch — command-line driver for the rust_fleet dispatch engine.
//!
//! Builds a random city of lettered stops, parks a handful of buses, submits
//! a burst of random ride requests, and runs frames until every passenger is
//! delivered.  Each frame is one `SimulationWorld::step`; a resolution pass
//! runs at most once per `resolution_interval_ms` of frame time, exactly as
//! an interactive front end would throttle it.
//!
//! Logging goes through `env_logger`: `RUST_LOG=debug` shows every
//! assignment and served stop.

mod network;
mod throttle;

use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::{Context, Result, ensure};
use clap::Parser;

use fd_core::{DispatchConfig, SimRng, Tick, VehicleId};
use fd_dispatch::Resolution;
use fd_fleet::MotionEvent;
use fd_sim::{LogObserver, SimObserver, TickStats, WorldBuilder};
use fd_spatial::DijkstraRouter;

use network::{build_city, label, route_label};
use throttle::ResolutionThrottle;

// ── CLI definition ────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(name = "city_dispatch", about = "Simulate on-demand bus dispatch over a random city")]
struct Args {
    /// Seed for the city layout, bus placement, and requests
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Number of stops (the first 26 are labelled A–Z)
    #[arg(long, default_value_t = 26)]
    stops: u32,

    /// Number of buses
    #[arg(long, default_value_t = 4)]
    buses: usize,

    /// Random requests submitted before the first frame
    #[arg(long, default_value_t = 20)]
    requests: usize,

    /// Random requests per burst, submitted every `burst_every` frames
    #[arg(long, default_value_t = 10)]
    burst: usize,

    /// Frames between bursts
    #[arg(long, default_value_t = 600)]
    burst_every: u64,

    /// How many bursts to submit before stopping once idle
    #[arg(long, default_value_t = 0)]
    bursts: usize,

    /// Frames per second of simulated frame time
    #[arg(long, default_value_t = 60)]
    fps: u32,

    /// Give up after this many frames
    #[arg(long, default_value_t = 100_000)]
    max_frames: u64,

    /// Sleep between frames so the run takes real time
    #[arg(long)]
    realtime: bool,

    /// JSON file with a `DispatchConfig`; missing fields use defaults
    #[arg(long)]
    config: Option<PathBuf>,

    /// Override the bus capacity
    #[arg(long)]
    capacity: Option<usize>,

    /// Override the resolution interval in milliseconds
    #[arg(long)]
    interval_ms: Option<u64>,

    /// Frames between progress summaries in the log (0 disables)
    #[arg(long, default_value_t = 600)]
    log_every: u64,
}

// ── Observer wrapper to count deliveries ──────────────────────────────────────

struct CountingObserver {
    inner:     LogObserver,
    assigned:  usize,
    delivered: usize,
    passes:    usize,
}

impl CountingObserver {
    fn new(inner: LogObserver) -> Self {
        Self { inner, assigned: 0, delivered: 0, passes: 0 }
    }
}

impl SimObserver for CountingObserver {
    fn on_tick_start(&mut self, tick: Tick) {
        self.inner.on_tick_start(tick);
    }

    fn on_resolution(&mut self, tick: Tick, resolution: Resolution) {
        if resolution.accepted() {
            self.assigned += 1;
        }
        self.inner.on_resolution(tick, resolution);
    }

    fn on_motion_event(&mut self, tick: Tick, vehicle: VehicleId, event: MotionEvent) {
        if let MotionEvent::StopServed { released, .. } = event {
            self.delivered += released;
        }
        self.inner.on_motion_event(tick, vehicle, event);
    }

    fn on_tick_end(&mut self, tick: Tick, stats: &TickStats) {
        self.inner.on_tick_end(tick, stats);
    }

    fn on_sim_end(&mut self, final_tick: Tick) {
        self.inner.on_sim_end(final_tick);
    }
}

// ── Configuration ─────────────────────────────────────────────────────────────

fn load_config(args: &Args) -> Result<DispatchConfig> {
    let mut config = match &args.config {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("reading {}", path.display()))?;
            serde_json::from_str(&text).with_context(|| format!("parsing {}", path.display()))?
        }
        None => DispatchConfig::default(),
    };
    if let Some(capacity) = args.capacity {
        config.capacity = capacity;
    }
    if let Some(ms) = args.interval_ms {
        config.resolution_interval_ms = ms;
    }
    config.validate()?;
    Ok(config)
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    ensure!(args.stops >= 2, "need at least two stops, got {}", args.stops);
    ensure!(args.fps > 0, "fps must be positive");
    let config = load_config(&args)?;

    println!("=== city_dispatch: rust_fleet ===");
    println!(
        "Stops: {}  |  Buses: {} × {} seats  |  Seed: {}",
        args.stops, args.buses, config.capacity, args.seed
    );
    println!();

    // 1. City and buses.
    let mut rng = SimRng::new(args.seed);
    let graph = build_city(&mut rng.child(1), args.stops)?;
    let nodes = graph.node_ids().to_vec();
    println!("City: {} stops, {} edges", graph.node_count(), graph.edge_count());

    let mut placement = rng.child(2);
    let starts: Vec<_> = (0..args.buses)
        .filter_map(|_| placement.choose(&nodes).copied())
        .collect();

    let mut world = WorldBuilder::new(config.clone(), DijkstraRouter)
        .graph(graph)
        .vehicles(starts)
        .build()?;

    // 2. Initial burst of requests.
    let mut demand = rng.child(3);
    let mut submit = |world: &mut fd_sim::SimulationWorld, n: usize| -> Result<()> {
        for _ in 0..n {
            if let Some((from, to)) = demand.choose_pair(&nodes) {
                world.submit_request(from, to)?;
            }
        }
        Ok(())
    };
    submit(&mut world, args.requests)?;
    println!("Submitted {} requests", world.pending_requests().len());
    println!();

    // 3. Frame loop.
    let frame = Duration::from_secs(1) / args.fps;
    let mut throttle = ResolutionThrottle::from_config(&config);
    let mut obs = CountingObserver::new(LogObserver::new(args.log_every));
    let start = Instant::now();
    let mut frame_time = start;

    let mut frames: u64 = 0;
    let mut bursts_left = args.bursts;
    while frames < args.max_frames {
        if bursts_left > 0 && frames > 0 && frames.is_multiple_of(args.burst_every.max(1)) {
            submit(&mut world, args.burst)?;
            bursts_left -= 1;
        }
        if world.is_idle() && bursts_left == 0 {
            break;
        }

        let resolve = throttle.ready(frame_time);
        obs.passes += usize::from(resolve);
        world.step(resolve, &mut obs)?;

        frames += 1;
        frame_time += frame;
        if args.realtime {
            std::thread::sleep(frame_time.saturating_duration_since(Instant::now()));
        }
    }
    obs.on_sim_end(world.now());
    let elapsed = start.elapsed();

    // 4. Summary.
    println!(
        "Ran {} frames ({} resolution passes) in {:.3} s",
        frames,
        obs.passes,
        elapsed.as_secs_f64()
    );
    println!("  assigned  : {}", obs.assigned);
    println!("  delivered : {}", obs.delivered);
    println!("  pending   : {}", world.pending_requests().len());
    println!();

    // 5. Route table.
    println!("{:<6} {:<8} {:<10} {}", "Bus", "At", "Riders", "Route");
    println!("{}", "-".repeat(48));
    for snap in world.vehicle_snapshots() {
        println!(
            "{:<6} {:<8} {:<10} {}",
            format!("bus{}", snap.id.0),
            label(snap.location),
            format!("{}/{}", snap.passenger_count, config.capacity),
            route_label(&snap.stops),
        );
    }

    if !world.pending_requests().is_empty() {
        println!();
        println!("{:<8} {:<6} {:<6} {}", "Request", "From", "To", "Waiting since");
        for r in world.pending_requests() {
            println!("{:<8} {:<6} {:<6} {}", r.id.0, label(r.from), label(r.to), r.created_at);
        }
    }

    Ok(())
}
