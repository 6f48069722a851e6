//! Animalese command-line entry point
//!
//! Speaks the text given on the command line with the configured voice,
//! or writes it to a WAV file with `--out`.

use anyhow::{bail, Context};
use animalese::config::Config;
use animalese::playback::{create_device, DeviceChoice};
use animalese::speech::text;
use animalese::voice::{default_fallbacks, load_wav_file, resolve_source};
use animalese::Speaker;
use log::{debug, error, info};
use std::path::PathBuf;
use std::process;
use std::str::FromStr;
use std::sync::Arc;
use std::thread;
use std::time::Duration;

/// How often to poll the device while waiting for speech to finish
const POLL_INTERVAL: Duration = Duration::from_millis(20);

const USAGE: &str = "\
Usage: animalese [options] <text...>

Options:
  -d, --debug            Log debug output to animalese.log
  --pitch <factor>       Voice pitch, 0.5-2.0 (default from config)
  --duration <seconds>   Seconds per character, 0.02-0.15
  --sync <seconds>       Seconds per character of an external text reveal;
                         scaled by the configured duration multiplier
  --volume <level>       Volume, 0.0-1.0
  --shorten              Reduce words to their first and last letter
  --letters-only         Drop everything but letters and spaces
  --bank <path>          Voice bank WAV (26 letters, 0.15s each)
  --device <name>        auto, pulseaudio, memory or wav:<path>
  --out <path>           Write a WAV file instead of playing
  -h, --help             Show this help";

/// Parsed command line
#[derive(Debug, Default)]
struct Options {
    debug: bool,
    pitch: Option<f32>,
    duration: Option<f32>,
    sync: Option<f32>,
    volume: Option<f32>,
    shorten: bool,
    letters_only: bool,
    bank: Option<PathBuf>,
    device: Option<String>,
    out: Option<PathBuf>,
    text: Vec<String>,
}

fn parse_value<T: FromStr>(flag: &str, value: Option<String>) -> anyhow::Result<T> {
    let value = value.with_context(|| format!("{} needs a value", flag))?;
    value
        .parse()
        .map_err(|_| anyhow::anyhow!("Invalid value for {}: {}", flag, value))
}

fn parse_args(args: impl IntoIterator<Item = String>) -> anyhow::Result<Options> {
    let mut options = Options::default();
    let mut args = args.into_iter();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "-d" | "--debug" => options.debug = true,
            "--pitch" => options.pitch = Some(parse_value(&arg, args.next())?),
            "--duration" => options.duration = Some(parse_value(&arg, args.next())?),
            "--sync" => options.sync = Some(parse_value(&arg, args.next())?),
            "--volume" => options.volume = Some(parse_value(&arg, args.next())?),
            "--shorten" => options.shorten = true,
            "--letters-only" => options.letters_only = true,
            "--bank" => options.bank = Some(parse_value(&arg, args.next())?),
            "--device" => options.device = Some(parse_value(&arg, args.next())?),
            "--out" => options.out = Some(parse_value(&arg, args.next())?),
            "-h" | "--help" => {
                println!("{}", USAGE);
                process::exit(0);
            }
            flag if flag.starts_with("--") => bail!("Unknown option {}\n\n{}", flag, USAGE),
            _ => options.text.push(arg),
        }
    }

    Ok(options)
}

fn init_logging(debug_mode: bool) {
    if debug_mode {
        // Debug mode: write to animalese.log file
        use std::fs::OpenOptions;
        match OpenOptions::new()
            .create(true)
            .append(true)
            .open("animalese.log")
        {
            Ok(log_file) => {
                env_logger::Builder::new()
                    .filter_level(log::LevelFilter::Debug)
                    .target(env_logger::Target::Pipe(Box::new(log_file)))
                    .init();
            }
            Err(e) => {
                eprintln!("Warning: Failed to open animalese.log for debug logging: {}", e);
                env_logger::Builder::new()
                    .filter_level(log::LevelFilter::Warn)
                    .init();
            }
        }

        info!("Animalese version {} starting (debug mode)", animalese::VERSION);
    } else {
        env_logger::Builder::new()
            .filter_level(log::LevelFilter::Error)
            .parse_default_env()
            .init();
    }
}

fn main() {
    let options = match parse_args(std::env::args().skip(1)) {
        Ok(options) => options,
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(2);
        }
    };

    init_logging(options.debug);

    if let Err(e) = run(options) {
        error!("Fatal error: {:#}", e);
        eprintln!("Error: {:#}", e);
        process::exit(1);
    }
}

/// Line printed once speech has been handed to the device
fn status_line(device_name: &str, choice: &DeviceChoice, chars: usize) -> String {
    match choice {
        DeviceChoice::WavFile(path) => format!("Wrote {} chars to {}", chars, path.display()),
        _ => format!("Speaking {} chars on {}", chars, device_name),
    }
}

fn run(options: Options) -> anyhow::Result<()> {
    if options.text.is_empty() {
        bail!("Nothing to say\n\n{}", USAGE);
    }

    let config = Config::load().context("Failed to load configuration")?;
    let mut settings = config.voice_settings();
    if let Some(pitch) = options.pitch {
        settings.set_pitch(pitch);
    }
    if let Some(duration) = options.duration {
        settings.set_letter_duration(duration);
    }
    if let Some(volume) = options.volume {
        settings.set_volume(volume);
    }
    if options.shorten {
        settings.shorten_words = true;
    }
    debug!("Voice settings: {:?}", settings);

    let configured = options.bank.clone().or_else(|| config.bank_path());
    let bank_path = resolve_source(configured.as_deref(), &default_fallbacks())
        .context("No voice bank found (use --bank or set [bank] path in the config)")?;
    let bank = load_wav_file(&bank_path)
        .with_context(|| format!("Failed to load voice bank {}", bank_path.display()))?;

    let choice = match (&options.out, &options.device) {
        (Some(out), _) => DeviceChoice::WavFile(out.clone()),
        (None, Some(name)) => DeviceChoice::parse(name)?,
        (None, None) => config.device()?,
    };
    let device = create_device(&choice)?;
    let device_name = device.name();

    let mut speaker = Speaker::new(device, settings);
    speaker.load_bank(Arc::new(bank));

    let mut message = options.text.join(" ");
    if options.letters_only {
        message = text::strip_non_letters(&message);
    }

    match options.sync {
        Some(seconds_per_char) => speaker.speak_synced(&message, seconds_per_char)?,
        None => speaker.speak(&message)?,
    }
    println!("{}", status_line(device_name, &choice, message.chars().count()));

    while speaker.is_speaking() {
        thread::sleep(POLL_INTERVAL);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_parse_args() {
        let options = parse_args(args(&["--pitch", "1.5", "--shorten", "hello", "there"])).unwrap();
        assert_eq!(options.pitch, Some(1.5));
        assert!(options.shorten);
        assert_eq!(options.text, vec!["hello", "there"]);
    }

    #[test]
    fn test_status_line() {
        let wav = DeviceChoice::WavFile(PathBuf::from("out.wav"));
        assert_eq!(status_line("wav", &wav, 5), "Wrote 5 chars to out.wav");
        assert_eq!(
            status_line("pulseaudio", &DeviceChoice::Auto, 5),
            "Speaking 5 chars on pulseaudio"
        );
    }

    #[test]
    fn test_parse_args_errors() {
        assert!(parse_args(args(&["--pitch"])).is_err());
        assert!(parse_args(args(&["--pitch", "high"])).is_err());
        assert!(parse_args(args(&["--loud", "hi"])).is_err());
    }
}
