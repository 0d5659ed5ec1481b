//! Interactive console front-end
//!
//! Collects movie details line by line, runs an estimator and prints the
//! result block, until the user declines another round or input ends.

pub mod render;


use crate::error::Result;
use crate::estimator::{GenreTable, HeuristicRevenueEstimator, VariationSource};
use crate::ml::{MovieFeatures, RevenueModel};
use crate::report::{Analysis, RiskWarning};
use crate::types::{PredictionRequest, Season};
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use std::io::Write;
use std::str::FromStr;

/// Title used when the user leaves it blank
pub const DEFAULT_TITLE: &str = "Radhe Shyam";

/// Source of user input lines
pub trait Prompter {
    /// Next line, or `None` once the user has ended input
    fn read_line(&mut self, prompt: &str) -> Result<Option<String>>;
}

/// Line editor backed prompter for real terminals
pub struct RustylinePrompter {
    editor: DefaultEditor,
}

impl RustylinePrompter {
    pub fn new() -> Result<Self> {
        Ok(Self {
            editor: DefaultEditor::new()?,
        })
    }
}

impl Prompter for RustylinePrompter {
    fn read_line(&mut self, prompt: &str) -> Result<Option<String>> {
        match self.editor.readline(prompt) {
            Ok(line) => Ok(Some(line)),
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}

/// One movie as entered by the user
#[derive(Debug, Clone)]
struct MovieInput {
    title: String,
    request: PredictionRequest,
}

/// Console session over a prompter and an output sink
pub struct Console<P, W> {
    prompter: P,
    out: W,
}

impl<P: Prompter, W: Write> Console<P, W> {
    pub fn new(prompter: P, out: W) -> Self {
        Self { prompter, out }
    }

    pub fn into_output(self) -> W {
        self.out
    }

    /// Heuristic prediction loop. Returns the number of predictions shown.
    pub fn run_heuristic<V>(&mut self, estimator: &HeuristicRevenueEstimator, variation: &mut V) -> Result<usize>
    where
        V: VariationSource + ?Sized,
    {
        render::header(&mut self.out)?;
        render::quick_tips(&mut self.out)?;

        let mut shown = 0;
        loop {
            let Some(input) = self.read_movie(estimator.genres())? else {
                break;
            };

            if let Ok(genre) = estimator.genres().get(&input.request.genre) {
                render::genre_info(&mut self.out, genre)?;
            }
            render::warnings(&mut self.out, &RiskWarning::assess(&input.request))?;

            writeln!(self.out, "\n🤖 Running accurate industry analysis...")?;
            let analysis = estimator
                .predict(&input.request, variation)
                .and_then(|result| Analysis::new(input.title, input.request, result));

            match analysis {
                Ok(analysis) => {
                    render::analysis(&mut self.out, &analysis)?;
                    shown += 1;
                }
                Err(e) => {
                    tracing::warn!("console prediction failed: {}", e);
                    writeln!(self.out, "\nAn error occurred: {}", e)?;
                    writeln!(self.out, "Please try again.")?;
                }
            }

            if !self.ask_again("Predict another movie? (y/n): ")? {
                break;
            }
        }

        render::farewell(&mut self.out)?;
        Ok(shown)
    }

    /// Trained-model prediction loop. Returns the number of predictions shown.
    pub fn run_model(&mut self, model: &RevenueModel) -> Result<usize> {
        render::header(&mut self.out)?;
        writeln!(self.out, "\n🤖 Predictions from a model trained on {} movies", model.training_rows())?;

        let mut shown = 0;
        loop {
            let Some(features) = self.read_features()? else {
                break;
            };

            match model.estimate(&features) {
                Ok(estimate) => {
                    render::model_estimate(&mut self.out, &estimate)?;
                    shown += 1;
                }
                Err(e) => {
                    tracing::warn!("console model prediction failed: {}", e);
                    writeln!(self.out, "\nAn error occurred: {}", e)?;
                    writeln!(self.out, "Please try again.")?;
                }
            }

            if !self.ask_again("Predict another movie? (y/n): ")? {
                break;
            }
        }

        render::farewell(&mut self.out)?;
        Ok(shown)
    }

    fn read_movie(&mut self, genres: &GenreTable) -> Result<Option<MovieInput>> {
        writeln!(self.out, "\n🎬 ENTER YOUR MOVIE DETAILS")?;
        writeln!(self.out, "{}", "-".repeat(40))?;

        let Some(title) = self.prompter.read_line("Movie Title: ")? else {
            return Ok(None);
        };
        let title = match title.trim() {
            "" => DEFAULT_TITLE.to_string(),
            t => t.to_string(),
        };

        writeln!(self.out, "\nAvailable Genres:")?;
        for (i, name) in genres.names().enumerate() {
            writeln!(self.out, "{}. {}", i + 1, name)?;
        }
        let count = genres.len();
        let Some(choice) = self.ask_number::<usize>(
            &format!("Choose genre (1-{}): ", count),
            |c| (1..=count).contains(c),
            &format!("Please enter a number between 1 and {}", count),
        )?
        else {
            return Ok(None);
        };
        let Some(genre) = genres.by_position(choice).map(|g| g.name.clone()) else {
            return Ok(None);
        };

        let Some(budget) = self.ask_number::<f64>(
            "Production Budget (in millions): ",
            |b| b.is_finite() && *b > 0.0,
            "Budget must be positive",
        )?
        else {
            return Ok(None);
        };

        let Some(rating) = self.ask_number::<f64>(
            "Expected Quality Rating (1-10): ",
            |r| (1.0..=10.0).contains(r),
            "Rating must be between 1 and 10",
        )?
        else {
            return Ok(None);
        };

        writeln!(self.out, "\nRelease Seasons:")?;
        for (i, season) in Season::CHOICES.iter().enumerate() {
            writeln!(self.out, "{}. {}", i + 1, season)?;
        }
        let Some(season_choice) = self.ask_number::<usize>(
            "Choose release season (1-3): ",
            |c| (1..=Season::CHOICES.len()).contains(c),
            "Please enter a number between 1 and 3",
        )?
        else {
            return Ok(None);
        };
        let season = Season::CHOICES[season_choice - 1];

        let Some(has_star) = self.ask_yes_no("Has Famous Actor? (y/n): ")? else {
            return Ok(None);
        };
        let Some(is_sequel) = self.ask_yes_no("Is Sequel/Franchise? (y/n): ")? else {
            return Ok(None);
        };

        Ok(Some(MovieInput {
            title,
            request: PredictionRequest::new(budget, genre, rating, season, has_star, is_sequel),
        }))
    }

    fn read_features(&mut self) -> Result<Option<MovieFeatures>> {
        writeln!(self.out, "\n🎬 ENTER YOUR MOVIE DETAILS")?;
        writeln!(self.out, "{}", "-".repeat(40))?;

        let Some(budget) = self.ask_number::<f64>(
            "Production Budget (in dollars): ",
            |b| b.is_finite() && *b > 0.0,
            "Budget must be positive",
        )?
        else {
            return Ok(None);
        };
        let Some(score) = self.ask_number::<f64>(
            "Expected Audience Score (1-10): ",
            |s| (1.0..=10.0).contains(s),
            "Score must be between 1 and 10",
        )?
        else {
            return Ok(None);
        };
        let Some(votes) = self.ask_number::<f64>(
            "Expected Number of Votes: ",
            |v| v.is_finite() && *v >= 0.0,
            "Votes cannot be negative",
        )?
        else {
            return Ok(None);
        };
        let Some(runtime) = self.ask_number::<f64>(
            "Runtime (minutes): ",
            |r| r.is_finite() && *r > 0.0,
            "Runtime must be positive",
        )?
        else {
            return Ok(None);
        };
        let Some(year) = self.ask_number::<u16>(
            "Release Year: ",
            |y| (1900..=2100).contains(y),
            "Please enter a year between 1900 and 2100",
        )?
        else {
            return Ok(None);
        };

        Ok(Some(MovieFeatures {
            budget,
            score,
            votes,
            runtime,
            year: f64::from(year),
        }))
    }

    /// Re-prompts until the line parses and is accepted
    fn ask_number<T: FromStr>(
        &mut self,
        prompt: &str,
        accept: impl Fn(&T) -> bool,
        out_of_range: &str,
    ) -> Result<Option<T>> {
        loop {
            let Some(line) = self.prompter.read_line(prompt)? else {
                return Ok(None);
            };
            match line.trim().parse::<T>() {
                Ok(value) if accept(&value) => return Ok(Some(value)),
                Ok(_) => writeln!(self.out, "{}", out_of_range)?,
                Err(_) => writeln!(self.out, "Please enter a valid number")?,
            }
        }
    }

    /// Only `y` counts as yes
    fn ask_yes_no(&mut self, prompt: &str) -> Result<Option<bool>> {
        Ok(self
            .prompter
            .read_line(prompt)?
            .map(|line| line.trim().eq_ignore_ascii_case("y")))
    }

    fn ask_again(&mut self, prompt: &str) -> Result<bool> {
        writeln!(self.out, "\n{}", "=".repeat(70))?;
        Ok(self.ask_yes_no(prompt)?.unwrap_or(false))
    }
}
