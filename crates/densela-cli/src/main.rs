use anyhow::Result;
use clap::{Arg, ArgMatches, Command, ValueHint};
use log::LevelFilter;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use densela::{build_dispatch, Dispatch, Element, ElementKind, Matrix};
use densela_cli::config::resolve_dispatch_config;
use densela_cli::io::{delimiter_for, parse_delimiter, read_matrix_as};

fn matrix_arg(name: &'static str, help: &'static str) -> Arg {
    Arg::new(name)
        .help(help)
        .required(true)
        .value_parser(clap::value_parser!(PathBuf))
        .value_hint(ValueHint::FilePath)
}

fn main() -> Result<()> {
    env_logger::Builder::default()
        .filter_level(LevelFilter::Error)
        .parse_env(env_logger::Env::default().filter_or("DENSELA_LOG", "error,densela=info"))
        .init();

    let matches = Command::new("densela")
        .version(clap::crate_version!())
        .author("Justin Sing <justincsing@gmail.com>")
        .about("Dense matrix algebra on delimited text files")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("config")
                .long("config")
                .global(true)
                .help("Path to a JSON dispatch configuration file")
                .value_parser(clap::value_parser!(PathBuf))
                .value_hint(ValueHint::FilePath),
        )
        .arg(
            Arg::new("strategy")
                .short('s')
                .long("strategy")
                .global(true)
                .help("Execution strategy. Overrides the strategy in the configuration file.")
                .value_parser(["sequential", "parallel"]),
        )
        .arg(
            Arg::new("delimiter")
                .short('d')
                .long("delimiter")
                .global(true)
                .help("Field delimiter of input files. Defaults to tab for .tsv and comma otherwise.")
                .value_parser(clap::builder::NonEmptyStringValueParser::new()),
        )
        .arg(
            Arg::new("element")
                .short('e')
                .long("element")
                .global(true)
                .help("Element type matrix cells are parsed as (i8 .. i64, isize, u8 .. u64, usize, f32, f64). Defaults to f64.")
                .value_parser(clap::builder::NonEmptyStringValueParser::new()),
        )
        .subcommand(
            Command::new("show")
                .about("Print a matrix and its shape")
                .arg(matrix_arg("matrix", "Path to the matrix file")),
        )
        .subcommand(
            Command::new("transpose")
                .about("Print the transpose of a matrix")
                .arg(matrix_arg("matrix", "Path to the matrix file")),
        )
        .subcommand(
            Command::new("det")
                .about("Print the determinant of a square matrix")
                .arg(matrix_arg("matrix", "Path to the matrix file")),
        )
        .subcommand(
            Command::new("inv")
                .about("Print the inverse of a square matrix")
                .arg(matrix_arg("matrix", "Path to the matrix file")),
        )
        .subcommand(
            Command::new("mul")
                .about("Print the product A x B")
                .arg(matrix_arg("lhs", "Path to the left matrix A"))
                .arg(matrix_arg("rhs", "Path to the right matrix B")),
        )
        .subcommand(
            Command::new("stats")
                .about("Print the mean and sample standard deviation of all cells")
                .arg(matrix_arg("matrix", "Path to the matrix file")),
        )
        .subcommand(
            Command::new("identity")
                .about("Print the n x n identity matrix")
                .arg(
                    Arg::new("n")
                        .help("Matrix order")
                        .required(true)
                        .value_parser(clap::value_parser!(usize)),
                ),
        )
        .help_template(
            "{usage-heading} {usage}\n\n\
             {about-with-newline}\n\
             Written by {author-with-newline}Version {version}\n\n\
             {all-args}{after-help}",
        )
        .get_matches();

    let Some((name, sub_m)) = matches.subcommand() else {
        unreachable!("Subcommand is required by CLI configuration")
    };

    let config = resolve_dispatch_config(
        sub_m.get_one::<PathBuf>("config"),
        sub_m.get_one::<String>("strategy").map(String::as_str),
    )?;
    log::debug!("Dispatch configuration: {:?}", config);
    let dispatch = build_dispatch(&config)?;

    let kind = ElementKind::from_str(
        sub_m
            .get_one::<String>("element")
            .map_or("f64", String::as_str),
    )
    .map_err(anyhow::Error::msg)?;
    log::debug!("Parsing cells as {}", kind);

    match kind {
        ElementKind::I8 => run::<i8>(name, sub_m, &dispatch),
        ElementKind::I16 => run::<i16>(name, sub_m, &dispatch),
        ElementKind::I32 => run::<i32>(name, sub_m, &dispatch),
        ElementKind::I64 => run::<i64>(name, sub_m, &dispatch),
        ElementKind::Isize => run::<isize>(name, sub_m, &dispatch),
        ElementKind::U8 => run::<u8>(name, sub_m, &dispatch),
        ElementKind::U16 => run::<u16>(name, sub_m, &dispatch),
        ElementKind::U32 => run::<u32>(name, sub_m, &dispatch),
        ElementKind::U64 => run::<u64>(name, sub_m, &dispatch),
        ElementKind::Usize => run::<usize>(name, sub_m, &dispatch),
        ElementKind::F32 => run::<f32>(name, sub_m, &dispatch),
        ElementKind::F64 => run::<f64>(name, sub_m, &dispatch),
    }
}

/// Run subcommand `name` with matrix cells of type `T`. Determinant, inverse
/// and statistics are computed on the `f64` widening.
fn run<T>(name: &str, matches: &ArgMatches, dispatch: &Dispatch) -> Result<()>
where
    T: Element + FromStr,
    <T as FromStr>::Err: std::error::Error + Send + Sync + 'static,
{
    match name {
        "show" => print_matrix(&load::<T>(matches, "matrix")?),
        "transpose" => print_matrix(&load::<T>(matches, "matrix")?.transpose_with(dispatch)),
        "det" => println!("{}", load::<T>(matches, "matrix")?.determinant()?),
        "inv" => print_matrix(&load::<T>(matches, "matrix")?.inverse()?),
        "mul" => {
            let lhs = load::<T>(matches, "lhs")?;
            let rhs = load::<T>(matches, "rhs")?;
            print_matrix(&lhs.multiply_with(dispatch, &rhs)?);
        }
        "stats" => print_stats(&load::<T>(matches, "matrix")?)?,
        "identity" => {
            let n: usize = *matches.get_one("n").unwrap();
            print_matrix(&Matrix::<T>::identity(n));
        }
        _ => unreachable!(),
    }
    Ok(())
}

fn load<T>(matches: &ArgMatches, arg: &str) -> Result<Matrix<T>>
where
    T: Element + FromStr,
    <T as FromStr>::Err: std::error::Error + Send + Sync + 'static,
{
    let path: &PathBuf = matches.get_one(arg).unwrap();
    let explicit = match matches.get_one::<String>("delimiter") {
        Some(value) => Some(parse_delimiter(value)?),
        None => None,
    };
    log::info!("[densela] Reading matrix from {:?}", path);
    read_matrix_as(path, delimiter_for(path, explicit))
}

fn print_matrix<T: fmt::Display>(m: &Matrix<T>) {
    let (rows, cols) = m.shape();
    println!("{} x {}{}", rows, cols, m);
}

fn print_stats<T: Element>(m: &Matrix<T>) -> Result<()> {
    match (m.mean(), m.mean_and_std_dev()) {
        (_, Some((mean, std_dev))) => {
            println!("mean\t{}", mean);
            println!("std_dev\t{}", std_dev);
        }
        (Some(mean), None) => {
            println!("mean\t{}", mean);
            println!("std_dev\tundefined");
        }
        (None, None) => anyhow::bail!("Matrix has no cells"),
    }
    Ok(())
}
