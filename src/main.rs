use anyhow::{bail, Context};
use clap::Parser;
use registrar::cli::{Cli, Cmd, ListArgs};
use registrar::client::{ListQuery, RecordStore, RestClient, SortSpec};
use registrar::config::Config;
use registrar::logging::{init_tracing, LogTarget};
use registrar::schema::{schema_for, EntitySchema, ENTITIES};
use registrar::view::{text, PaginationView, TableRenderer};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = match &cli.overrides.config {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    }
    .context("Failed to load configuration")?;
    cli.overrides.apply(&mut config);
    config.validate().context("Invalid configuration")?;

    match cli.cmd.unwrap_or(Cmd::Tui) {
        Cmd::Tui => {
            init_tracing(&config.logging, LogTarget::File);
            tracing::info!(base_url = %config.api.base_url, "Starting registrar");
            registrar::ui::run(&config)
        }
        Cmd::List(args) => {
            init_tracing(&config.logging, LogTarget::Stderr);
            list(&config, &args)
        }
        Cmd::Entities { json } => print_entities(json),
    }
}

fn list(config: &Config, args: &ListArgs) -> anyhow::Result<()> {
    let schema = schema_for(&config.ui.initial_entity)?;
    let mut query = ListQuery::page(args.page, config.ui.page_size)
        .with_search(args.search.as_deref().unwrap_or(""));
    if let Some(field) = &args.sort {
        if !schema.is_header_sortable(field) {
            bail!("'{}' is not a sortable {} field", field, schema.name);
        }
        query = query.with_sort(SortSpec::new(field.as_str(), args.order.into()));
    }

    let client = RestClient::new(&config.api)?;
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("Failed to start async runtime")?;
    let page = runtime
        .block_on(client.list(schema.name, &query))
        .with_context(|| format!("Failed to load {}", schema.name))?;

    let header = TableRenderer::render_header(schema.fields, query.sort.as_ref());
    let body = TableRenderer::render_rows(schema.fields, &page.records);
    let pagination = PaginationView::new(args.page, config.ui.page_size, page.total);
    print!("{}", text::render_page(&header, &body, &pagination));
    if !page.total_reported {
        tracing::warn!(entity = schema.name, "Server did not report a total count");
    }
    Ok(())
}

fn print_entities(json: bool) -> anyhow::Result<()> {
    if json {
        let rendered =
            serde_json::to_string_pretty(&ENTITIES).context("Failed to serialize schemas")?;
        println!("{rendered}");
        return Ok(());
    }
    for schema in &ENTITIES {
        print_schema(schema);
    }
    Ok(())
}

fn print_schema(schema: &EntitySchema) {
    println!("{} ({}): {}", schema.name, schema.title, schema.subtitle);
    for field in schema.fields {
        let mut flags = Vec::new();
        if field.required {
            flags.push("required");
        }
        if !field.editable {
            flags.push("read-only");
        }
        if !field.sortable {
            flags.push("unsortable");
        }
        if !field.show_in_table {
            flags.push("hidden");
        }
        let mut line = format!(
            "  {:<16} {:<16} {:<8}",
            field.key,
            field.label,
            field.data_type.as_str()
        );
        if !flags.is_empty() {
            line.push_str(&format!(" [{}]", flags.join(", ")));
        }
        if !field.options.is_empty() {
            line.push_str(&format!(" options: {}", field.options.join(" | ")));
        }
        println!("{}", line.trim_end());
    }
    println!();
}
