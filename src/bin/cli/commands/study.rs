use std::io::{self, BufRead, Write};

use anyhow::Result;
use chrono::Utc;
use rand::rngs::StdRng;
use rand::SeedableRng;

use flashdeck_lib::flashcards::images::{image_status, ImageStatus};
use flashdeck_lib::flashcards::rating::format_interval;
use flashdeck_lib::flashcards::{Rating, StudySession};

use crate::app::App;
use crate::render::terminal::{local_time, paint, wrap_lines, Color};

/// What the user typed at a study prompt
enum Input {
    Line(String),
    Eof,
}

fn prompt<R: BufRead, W: Write>(input: &mut R, output: &mut W, text: &str) -> Result<Input> {
    write!(output, "{} ", text)?;
    output.flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(Input::Eof);
    }
    Ok(Input::Line(line.trim().to_lowercase()))
}

pub fn run(app: &mut App, seed: Option<u64>, use_color: bool) -> Result<()> {
    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let stdin = io::stdin();
    let stdout = io::stdout();
    study_loop(app, &mut rng, &mut stdin.lock(), &mut stdout.lock(), use_color)
}

fn study_loop<R: BufRead, W: Write>(
    app: &mut App,
    rng: &mut StdRng,
    input: &mut R,
    output: &mut W,
    use_color: bool,
) -> Result<()> {
    let mut session = StudySession::start(&app.deck, Utc::now(), rng);

    if session.is_empty() {
        writeln!(
            output,
            "No cards available for study! All cards might be suppressed or you haven't added any cards yet."
        )?;
        return Ok(());
    }

    writeln!(
        output,
        "Available cards: {} out of {} total",
        session.len(),
        app.deck.len()
    )?;

    let delays = app.config.ratings;
    let rating_prompt = Rating::ALL
        .iter()
        .map(|rating| {
            let label = rating.label();
            format!(
                "[{}]{} ({})",
                &label[..1].to_lowercase(),
                &label[1..],
                format_interval(delays.days(*rating))
            )
        })
        .collect::<Vec<_>>()
        .join("  ");

    loop {
        let Some(index) = session.current() else {
            writeln!(output)?;
            writeln!(output, "{}", paint("You've completed all available cards!", Color::GREEN, use_color))?;
            match prompt(input, output, "Start over? [y/N]")? {
                Input::Line(line) if line == "y" || line == "yes" => {
                    session.restart(rng);
                    continue;
                }
                _ => break,
            }
        };

        let Some(card) = session.current_card(&app.deck).cloned() else {
            log::warn!("Card {} disappeared during the session, skipping", index);
            session.skip();
            continue;
        };

        if !session.is_revealed() {
            writeln!(output)?;
            let counter = format!("Card {} of {}", session.cursor() + 1, session.len());
            writeln!(output, "{}", paint(&counter, Color::DIM, use_color))?;
            writeln!(output, "{}", paint("Question:", Color::BOLD, use_color))?;
            for line in wrap_lines(&card.question, "  ", 80) {
                writeln!(output, "{}", line)?;
            }
            match image_status(&card, &app.config.data_dir) {
                ImageStatus::NoImage => {}
                ImageStatus::Present(path) => writeln!(output, "  Image: {}", path.display())?,
                ImageStatus::Missing(path) => writeln!(
                    output,
                    "  {}",
                    paint(&format!("Image file not found: {}", path.display()), Color::YELLOW, use_color)
                )?,
            }

            match prompt(input, output, "[Enter] reveal  [s]kip  [q]uit >")? {
                Input::Eof => break,
                Input::Line(line) => match line.as_str() {
                    "" | "r" => session.reveal(),
                    "s" => session.skip(),
                    "q" => break,
                    _ => writeln!(output, "Unknown command {:?}", line)?,
                },
            }
            continue;
        }

        writeln!(output, "{}", paint("Answer:", Color::BOLD, use_color))?;
        for line in wrap_lines(&card.answer, "  ", 80) {
            writeln!(output, "{}", paint(&line, Color::CYAN, use_color))?;
        }

        let line = match prompt(input, output, &format!("{}  [s]kip  [q]uit >", rating_prompt))? {
            Input::Eof => break,
            Input::Line(line) => line,
        };

        let rating = line.chars().next().filter(|_| line.chars().count() == 1).and_then(Rating::from_key);
        match (line.as_str(), rating) {
            (_, Some(rating)) => {
                let record = session.rate(&mut app.deck, delays.days(rating), Utc::now())?;
                if let Some(until) = record.and_then(|r| r.suppress_until) {
                    writeln!(output, "{}: hidden until {}", rating.label(), local_time(&until))?;
                }
            }
            ("s", None) => session.skip(),
            ("q", None) => break,
            _ => writeln!(output, "Unknown command {:?}", line)?,
        }
    }

    Ok(())
}
