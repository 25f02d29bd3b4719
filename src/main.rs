use std::process::ExitCode;

use clap::{Parser as CliParser, ValueEnum, builder::RangedU64ValueParser};
use tcalc::{
    is_blank,
    interpreter::{
        evaluator::{AngleUnit, Evaluator},
        lexer::{Lexer, LexerOptions},
        parser::Parser,
        value::{
            format::{DEFAULT_DIGITS, MAX_DIGITS, NumberFormat},
            number::DEFAULT_PRECISION,
        },
    },
};
use tracing_subscriber::EnvFilter;

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Angle {
    Deg,
    Rad,
    Grad,
}

impl From<Angle> for AngleUnit {
    fn from(angle: Angle) -> Self {
        match angle {
            Angle::Deg => Self::Degrees,
            Angle::Rad => Self::Radians,
            Angle::Grad => Self::Gradians,
        }
    }
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Format {
    General,
    Fixed,
    Scientific,
}

impl From<Format> for NumberFormat {
    fn from(format: Format) -> Self {
        match format {
            Format::General => Self::General,
            Format::Fixed => Self::Fixed,
            Format::Scientific => Self::Scientific,
        }
    }
}

/// tcalc evaluates calculator expressions with arbitrary-precision complex
/// arithmetic. Every expression runs in the same session, so later ones see
/// the variables and functions defined by earlier ones.
#[derive(CliParser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Precision of every computation, in bits.
    #[arg(short, long, default_value_t = DEFAULT_PRECISION)]
    precision: u32,

    /// Unit of trigonometric arguments and inverse trigonometric results.
    #[arg(short, long, value_enum, default_value_t = Angle::Deg)]
    angle: Angle,

    /// Reject any result with an imaginary part.
    #[arg(short, long)]
    real: bool,

    /// Use `,` as the decimal point and `;` between function arguments.
    #[arg(short, long)]
    european: bool,

    /// How numbers are printed.
    #[arg(short, long, value_enum, default_value_t = Format::General)]
    format: Format,

    /// Significant digits for general notation, places after the point
    /// otherwise.
    #[arg(short, long, default_value_t = DEFAULT_DIGITS,
          value_parser = RangedU64ValueParser::<usize>::new().range(0..=MAX_DIGITS as u64))]
    digits: usize,

    /// Statements separated by `:` or newlines.
    #[arg(required = true)]
    expressions: Vec<String>,
}

fn main() -> ExitCode {
    let args = Args::parse();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt().with_env_filter(filter)
                             .with_writer(std::io::stderr)
                             .init();

    let options = if args.european { LexerOptions::european() } else { LexerOptions::default() };
    let mut evaluator = Evaluator::new(args.precision);
    evaluator.set_angle_unit(args.angle.into());
    evaluator.set_complex_mode(!args.real);

    let mut failed = false;
    for expression in &args.expressions {
        let mut parser = Parser::new(Lexer::new(expression.as_str(), options), args.precision);
        let statements = parser.parse_all();
        if !parser.diagnostics().is_empty() {
            for diagnostic in parser.diagnostics() {
                eprintln!("{expression}: {diagnostic}");
            }
            failed = true;
            continue;
        }

        for statement in statements.iter().filter(|statement| !is_blank(statement)) {
            match evaluator.evaluate(statement) {
                Ok(outcome) => {
                    println!("{}", outcome.render(args.format.into(), args.digits));
                    evaluator.commit_result(outcome);
                },
                Err(error) => {
                    eprintln!("{expression}: {error}");
                    failed = true;
                    break;
                },
            }
        }
    }

    if failed { ExitCode::FAILURE } else { ExitCode::SUCCESS }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn digits_are_bounded() {
        let args = Args::try_parse_from(["tcalc", "--digits", "1000", "1"]).unwrap();
        assert_eq!(args.digits, MAX_DIGITS);
        assert!(Args::try_parse_from(["tcalc", "--digits", "1001", "1"]).is_err());
        assert!(Args::try_parse_from(["tcalc", "-d", "18446744073709551615", "1"]).is_err());
        let args = Args::try_parse_from(["tcalc", "1"]).unwrap();
        assert_eq!(args.digits, DEFAULT_DIGITS);
    }
}
