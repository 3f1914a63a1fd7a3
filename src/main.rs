extern crate pretty_env_logger;

#[macro_use]
extern crate log;

use clap::Parser;
use kcm::{KcmArgs, KcmParams, ModelSelector, PlotData, PlotWriter, PointParser};

fn main() {
    let args = KcmArgs::parse();
    let level = if args.debug() {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };
    pretty_env_logger::formatted_timed_builder()
        .filter_level(level)
        .init();

    info!("starting");
    info!("params: {:#?}", args);
    if !args.validate() {
        error!("please fix arguments");
        std::process::exit(1);
    }

    let config = args.to_config();
    if let Err(e) = config.validate() {
        error!("{}", e);
        std::process::exit(1);
    }

    let points = match PointParser::default().parse_path(&args.io.input) {
        Ok(points) => points,
        Err(e) => {
            error!("unable to load --input: {}", e);
            std::process::exit(1);
        }
    };
    info!("loaded {} points with {} dimensions", points.len(), points.dim());

    let mut selector = match ModelSelector::new(config, points) {
        Ok(s) => s.with_progress(true),
        Err(e) => {
            error!("{}", e);
            std::process::exit(1);
        }
    };

    info!("clustering");
    let best = match selector.select() {
        Ok(best) => best,
        Err(e) => {
            error!("{}", e);
            std::process::exit(1);
        }
    };

    for score in selector.scores() {
        info!(
            "c={} entropy={:.6} iterations={}{}",
            score.c,
            score.entropy,
            score.iterations,
            if score.converged { "" } else { " (not converged)" }
        );
    }
    info!("best number of clusters: {}", best.c);
    for (i, center) in best.center_strings().iter().enumerate() {
        info!("center {}: {} with {} points", i, center, best.clusters[i].len());
    }

    if !args.io.no_plot {
        let data = PlotData::new(&best, selector.config(), selector.scores());
        let written = PlotWriter::new(&args.io.plot).and_then(|mut w| w.write(&data));
        if let Err(e) = written {
            error!("unable to write plot: {}", e);
            std::process::exit(1);
        }
    }

    info!("finished");
}
