use std::fmt;

use tracing_subscriber::EnvFilter;
use typed_emitter::{Callback, EmitterConfig, Event, EventEmitter};

#[derive(Debug)]
struct Unplayable(String);

impl fmt::Display for Unplayable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "cannot play {}", self.0)
    }
}

impl std::error::Error for Unplayable {}

struct Player {
    emitter: EventEmitter,
    on_track: Event<String>,
    on_seek: Event<(String, u32), Unplayable>,
}

impl Player {
    fn new() -> typed_emitter::Result<Self> {
        let emitter = EventEmitter::builder()
            .config(EmitterConfig::leak_checked(4))
            .build()?;
        let on_track = emitter.register_named_event("track");
        let on_seek = emitter.register_named_event("seek");
        Ok(Self {
            emitter,
            on_track,
            on_seek,
        })
    }

    fn play(&self, track: &str) {
        self.emitter.notify(&self.on_track, &track.to_string());
    }

    fn seek(&self, track: &str, second: u32) -> Result<(), Unplayable> {
        self.emitter.emit(&self.on_seek, &(track.to_string(), second))
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("Testing typed-emitter...\n");

    let player = Player::new()?;

    let announce = Callback::new(|track: &String| println!("📨 Now playing: {track}"));
    let listener = player.on_track.subscribe_callback(&announce);
    let _scrobbler = player
        .on_track
        .subscribe(|track: &String| println!("📨 Scrobbled: {track}"));

    player
        .on_seek
        .subscribe(|(track, second): &(String, u32)| {
            if *second > 600 {
                Err(Unplayable(format!("{track} at {second}s")))
            } else {
                println!("📨 Seeked {track} to {second}s");
                Ok(())
            }
        });

    player.play("Hello!");
    player.play("World!");

    player.seek("World!", 30)?;
    if let Err(err) = player.seek("World!", 900) {
        println!("⚠️  {err}");
    }

    listener.unbind();
    player.play("Only the scrobbler hears this");

    println!("\n{}", player.emitter.stats());
    println!("\n✅ Demo completed successfully!");
    Ok(())
}
