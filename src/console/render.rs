//! Plain-text rendering of predictions

use crate::estimator::GenreProfile;
use crate::ml::ModelEstimate;
use crate::report::{format_millions, format_pct, Analysis, RiskWarning};
use std::io::{self, Write};

const RULE_WIDTH: usize = 70;

fn rule(out: &mut impl Write, ch: char) -> io::Result<()> {
    writeln!(out, "{}", ch.to_string().repeat(RULE_WIDTH))
}

pub fn header(out: &mut impl Write) -> io::Result<()> {
    writeln!(out)?;
    rule(out, '=')?;
    writeln!(out, "🎬 MOVIE SUCCESS PREDICTOR")?;
    writeln!(out, "Will your movie be a Blockbuster or Flop? Get clear answers in plain English")?;
    rule(out, '=')
}

pub fn quick_tips(out: &mut impl Write) -> io::Result<()> {
    writeln!(out, "\n💡 QUICK TIPS:")?;
    for tip in [
        "Good ratings = More profit",
        "Summer releases = More viewers",
        "Horror movies = Best returns",
        "Big budgets need high quality",
        "Romance/Drama = Risky with big budgets",
        "Sequels perform better",
    ] {
        writeln!(out, "• {}", tip)?;
    }
    Ok(())
}

pub fn genre_info(out: &mut impl Write, genre: &GenreProfile) -> io::Result<()> {
    writeln!(
        out,
        "\n📊 {} Movie Info: {} • Risk: {}",
        genre.name, genre.description, genre.risk
    )
}

pub fn warnings(out: &mut impl Write, warnings: &[RiskWarning]) -> io::Result<()> {
    for warning in warnings {
        let icon = if warning.is_positive() { "💰" } else { "⚠️ " };
        writeln!(out, "\n{} {}: {}", icon, warning.title(), warning.message())?;
    }
    Ok(())
}

/// Full result block for a heuristic prediction
pub fn analysis(out: &mut impl Write, analysis: &Analysis) -> io::Result<()> {
    let f = &analysis.financials;

    writeln!(out)?;
    rule(out, '=')?;
    writeln!(out, "📊 YOUR PREDICTION RESULTS: {}", analysis.title)?;
    rule(out, '=')?;

    writeln!(out, "\n🎯 RESULT: {}", analysis.verdict.label())?;
    writeln!(out, "💡 {}", analysis.verdict.message())?;

    writeln!(out, "\n💰 FINANCIAL SUMMARY:")?;
    writeln!(out, "   Budget: ${}M", f.budget.normalize())?;
    writeln!(out, "   Predicted Revenue: {}", format_millions(f.revenue))?;
    writeln!(out, "   Net Profit: {}", format_millions(f.profit))?;
    writeln!(out, "   Return on Investment: {}", format_pct(f.roi_pct))?;

    writeln!(out, "\n📈 FINANCIAL BREAKDOWN:")?;
    writeln!(out, "   Production Cost: ${}M", f.budget.normalize())?;
    writeln!(out, "   Marketing Cost: {}", format_millions(f.marketing_cost))?;
    writeln!(out, "   Total Cost: {}", format_millions(f.total_cost))?;
    writeln!(out, "   Box Office Revenue: {}", format_millions(f.revenue))?;
    writeln!(out, "   Net Profit: {}", format_millions(f.profit))?;

    writeln!(out, "\n🔍 WHY THIS RESULT?")?;
    for (factor, explanation) in analysis.result.explanations().iter() {
        writeln!(out, "   • {}: {}", factor.title(), explanation)?;
    }

    let rec = analysis.recommendation;
    writeln!(out, "\n💡 WHAT SHOULD YOU DO?")?;
    writeln!(out, "   {} {}", rec.headline(), rec.summary())?;
    for step in rec.steps() {
        writeln!(out, "   - {}", step)?;
    }

    if let Some(comparison) = &analysis.comparison {
        writeln!(out, "\n🎬 REAL WORLD COMPARISON:")?;
        writeln!(out, "   {}:", comparison.heading)?;
        for movie in &comparison.movies {
            let outcome = if movie.profit.is_sign_negative() { "Loss" } else { "Profit" };
            writeln!(
                out,
                "   • {}: Budget ${}M, Revenue ${}M, {} ${}M ({} ROI)",
                movie.name,
                movie.budget.normalize(),
                movie.revenue.normalize(),
                outcome,
                movie.profit.abs().normalize(),
                format_pct(movie.roi_pct().round()),
            )?;
        }
    }
    Ok(())
}

/// Result block for a trained-model prediction
pub fn model_estimate(out: &mut impl Write, estimate: &ModelEstimate) -> io::Result<()> {
    let f = &estimate.financials;

    writeln!(out)?;
    rule(out, '=')?;
    writeln!(out, "🤖 MODEL PREDICTION")?;
    rule(out, '=')?;
    writeln!(out, "\n🎯 RESULT: {}", estimate.verdict.label())?;
    writeln!(out, "💡 {}", estimate.verdict.message())?;
    writeln!(out, "\n💰 FINANCIAL SUMMARY:")?;
    writeln!(out, "   Budget: {}", format_millions(f.budget))?;
    writeln!(out, "   Predicted Gross: {}", format_millions(f.revenue))?;
    writeln!(out, "   Total Cost: {}", format_millions(f.total_cost))?;
    writeln!(out, "   Net Profit: {}", format_millions(f.profit))?;
    writeln!(out, "   Return on Investment: {}", format_pct(f.roi_pct))
}

pub fn farewell(out: &mut impl Write) -> io::Result<()> {
    writeln!(out, "\nThank you for using Movie Success Predictor! 🎬")
}
