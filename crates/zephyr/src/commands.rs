use std::process::ExitCode;

use anyhow::Context;
use camino::Utf8Path;
use serde::Serialize;
use zephyr_errors::{Diagnostic, Renderer};
use zephyr_syntax::{BuildOptions, NodeTypeRegistry, TreeBuilder};

fn read(path: &Utf8Path) -> anyhow::Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("failed to read `{path}`"))
}

pub(crate) fn tree(path: &Utf8Path, strict: bool, raw: bool) -> anyhow::Result<ExitCode> {
    let text = read(path)?;
    let tokens = zephyr_tokenizer::tokenize(&text);
    tracing::info!(%path, tokens = tokens.len(), "tokenized");

    let tree = if strict {
        match TreeBuilder::try_build(&text, &tokens, BuildOptions::strict()) {
            Ok(tree) => tree,
            Err(error) => {
                let diagnostic = Diagnostic::malformed_token_stream(&error);
                eprintln!("{}", diagnostic.render(&Renderer::styled(), path.as_str(), &text));
                return Ok(ExitCode::FAILURE);
            }
        }
    } else {
        TreeBuilder::build(&text, &tokens)
    };

    if raw {
        for record in tree.records() {
            println!(
                "{} {} {} {}",
                record.type_id.raw(),
                u32::from(record.start),
                u32::from(record.end),
                record.size
            );
        }
    } else {
        print!("{tree}");
    }

    Ok(ExitCode::SUCCESS)
}

#[derive(Serialize)]
struct Span<'a> {
    start: u32,
    end: u32,
    tag: &'static str,
    text: &'a str,
}

pub(crate) fn highlight(path: &Utf8Path, json: bool) -> anyhow::Result<ExitCode> {
    let text = read(path)?;
    let tree = zephyr_parse::parse(&text);

    let spans = zephyr_parse::highlight(&tree)
        .into_iter()
        .map(|span| Span {
            start: span.range.start().into(),
            end: span.range.end().into(),
            tag: span.tag.as_str(),
            text: &text[span.range],
        })
        .collect::<Vec<_>>();

    if json {
        println!("{}", serde_json::to_string_pretty(&spans)?);
    } else {
        for span in &spans {
            println!("{}..{} {} {:?}", span.start, span.end, span.tag, span.text);
        }
    }

    Ok(ExitCode::SUCCESS)
}

pub(crate) fn check(path: &Utf8Path) -> anyhow::Result<ExitCode> {
    let text = read(path)?;
    let tree = zephyr_parse::parse(&text);
    let diagnostics = zephyr_parse::diagnostics(&tree);

    let renderer = Renderer::styled();
    for diagnostic in &diagnostics {
        eprintln!("{}", diagnostic.render(&renderer, path.as_str(), &text));
    }

    if diagnostics.is_empty() { Ok(ExitCode::SUCCESS) } else { Ok(ExitCode::FAILURE) }
}

pub(crate) fn node_types() {
    for node_type in NodeTypeRegistry::global().iter() {
        let style = node_type.style().map_or("-", |style| style.as_str());
        println!("{} {} {style}", node_type.id().raw(), node_type.name());
    }
}
