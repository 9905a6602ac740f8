/// Route `log` records to stderr with a UTC timestamp.
///
/// The rendering crates are noisy about unsupported SVG details, so they
/// only get to report errors.
pub fn init_logger(min_level: log::LevelFilter) -> Result<(), fern::InitError> {
    fern::Dispatch::new()
        .format(|out, message, record| {
            let now = time::OffsetDateTime::now_utc();
            out.finish(format_args!(
                "{} {:<5} {}",
                now.format(&time::macros::format_description!(
                    "[year]-[month]-[day] [hour]:[minute]:[second]"
                ))
                .unwrap_or_default(),
                record.level(),
                message
            ));
        })
        .level(min_level)
        .level_for("usvg", log::LevelFilter::Error)
        .level_for("resvg", log::LevelFilter::Error)
        .level_for("fontdb", log::LevelFilter::Error)
        .chain(std::io::stderr())
        .apply()?;

    Ok(())
}
