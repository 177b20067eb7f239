use bevy::app::ScheduleRunnerPlugin;
use bevy::ecs::message::{MessageReader, MessageWriter};
use bevy::prelude::*;
use bevy_firework_dynamics::prelude::*;
use std::time::Duration;

fn main() {
    println!("Starting Headless Fireworks Display...");
    println!("A fanfare fires at startup; the idle scheduler takes over afterward.");

    App::new()
        .add_plugins(MinimalPlugins.set(ScheduleRunnerPlugin::run_loop(Duration::from_secs_f64(
            1.0 / 60.0,
        ))))
        .add_plugins((FireworksCorePlugin, FireworksSchedulerPlugin))
        // Skip VFX and Debug plugins (headless)
        .add_systems(Startup, start_fanfare)
        .add_systems(Update, (announce_detonations, print_progress))
        .run();
}

fn start_fanfare(mut fanfares: MessageWriter<FanfareEvent>) {
    println!("\n[SETUP] Requesting opening fanfare...");
    fanfares.write(FanfareEvent);
}

fn announce_detonations(mut detonations: MessageReader<DetonationEvent>) {
    for burst in detonations.read() {
        println!(
            "[BURST] {} stars at ({:.1}, {:.1}) m",
            burst.stars, burst.position.x, burst.position.y
        );
    }
}

fn print_progress(
    time: Res<Time>,
    clock: Res<SimClock>,
    shells: Query<Entity, With<Shell>>,
    stars: Query<Entity, With<Star>>,
    mut timer: Local<f32>,
) {
    *timer += time.delta_secs();
    if *timer > 1.0 {
        *timer = 0.0;
        println!(
            "[INFO] t={:.1}s  fps={:.0}  shells={}  stars={}",
            clock.now,
            clock.framerate,
            shells.iter().count(),
            stars.iter().count()
        );
    }

    // Auto-quit after 15 seconds
    if time.elapsed_secs() > 15.0 {
        println!("[FINISHED] Display complete.");
        std::process::exit(0);
    }
}
