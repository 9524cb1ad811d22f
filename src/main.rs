use std::path::PathBuf;
use std::sync::mpsc::{self, Sender};

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use faderport::effects::{
    self, BLINK_INTERVAL, BLINK_TIMES, CHASE_STEP, CHASE_TICKS, COUNTDOWN_INTERVAL, SNAKE_STEP,
};
use faderport::{Button, Config, Controller, Direction, FaderPort, Handler};

/// Exercise a connected FaderPort: play the light shows, then echo
/// buttons, fader and rotary until "Off" is released.
#[derive(Parser, Debug)]
#[command(name = "faderport-demo")]
struct Args {
    /// YAML file with client name, port prefix and device index
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Which FaderPort to open when several are attached (overrides the config)
    #[arg(short, long)]
    index: Option<usize>,
}

/// Lights each button while it is held. Shift toggles fine fader control
/// from the rotary.
struct Demo {
    shift: bool,
    exit: Sender<()>,
}

impl Handler for Demo {
    fn on_open(&mut self, _controller: &mut Controller) {
        println!("FaderPort opened!!");
    }

    fn on_close(&mut self, _controller: &mut Controller) {
        println!("FaderPort closing...");
    }

    fn on_button(&mut self, controller: &mut Controller, button: Button, pressed: bool) {
        println!(
            "Button: {} {}",
            button.name,
            if pressed { "pressed" } else { "released" }
        );
        if button.name == "Shift" {
            self.shift = !self.shift;
        }
        if button.name == "Off" && !pressed {
            let _ = self.exit.send(());
        }

        let lit = if pressed {
            controller.light_on(button)
        } else {
            controller.light_off(button)
        };
        if let Err(err) = lit {
            eprintln!("failed to update {} light: {err}", button.name);
        }
    }

    fn on_fader(&mut self, controller: &mut Controller, _position: u16) {
        println!("Fader: {}", controller.fader());
    }

    fn on_fader_touch(&mut self, _controller: &mut Controller, touched: bool) {
        println!("Fader: {}", if touched { "touched" } else { "released" });
    }

    fn on_rotary(&mut self, controller: &mut Controller, direction: Direction) {
        println!(
            "Pan turned {}.",
            match direction {
                Direction::Clockwise => "clockwise",
                Direction::AntiClockwise => "anti-clockwise",
            }
        );
        if !self.shift {
            return;
        }

        let fader = i32::from(controller.fader());
        let target = match direction {
            Direction::Clockwise if fader < 1023 => fader + 1,
            Direction::Clockwise => return,
            Direction::AntiClockwise => fader - 1,
        };
        if let Err(err) = controller.set_fader(target) {
            eprintln!("failed to move fader: {err}");
        }
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    let mut config = match &args.config {
        Some(path) => Config::load(path)
            .with_context(|| format!("failed to load config from {}", path.display()))?,
        None => Config::default(),
    };
    if let Some(index) = args.index {
        config.index = index;
    }

    let (tx, rx) = mpsc::channel::<()>();
    let port = FaderPort::open(
        &config,
        Demo {
            shift: false,
            exit: tx,
        },
    )?;
    let session = port.session();

    effects::countdown(session, COUNTDOWN_INTERVAL)?;
    port.set_fader(1023)?;
    effects::snake(session, SNAKE_STEP)?;
    port.set_fader(512)?;
    effects::blink(session, BLINK_INTERVAL, BLINK_TIMES)?;
    port.set_fader(128)?;
    effects::chase(session, CHASE_STEP, 3, CHASE_TICKS)?;
    port.set_fader(0)?;

    println!("Try the buttons, the rotary and the fader. The \"Off\" button will exit.");
    let _ = rx.recv();

    port.close()?;
    Ok(())
}
