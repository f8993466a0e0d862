use std::path::PathBuf;

use clap::{Parser, Subcommand};
use medscribe_lib::pipeline::structuring::default_templates;
use medscribe_lib::{
    config, parse_complex_medication_string, MedicationRecord, NoteFormat, NoteStructurer,
    TemplateDescriptor,
};
use uuid::Uuid;

#[derive(Parser)]
#[command(name = "medscribe")]
#[command(version, about = "Normalize LLM-structured dictation into canonical clinical notes")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Normalize a saved LLM response into a structured note
    Normalize {
        /// File containing the raw LLM completion
        file: PathBuf,
        /// Template section titles (comma-separated)
        #[arg(long, value_delimiter = ',')]
        sections: Option<Vec<String>>,
        /// Force a note format instead of detecting it (standard, soap, consultation, prescription)
        #[arg(long)]
        format: Option<NoteFormat>,
        /// Transcription id to attach to the result
        #[arg(long)]
        id: Option<Uuid>,
        /// Print Markdown instead of JSON
        #[arg(long)]
        markdown: bool,
    },
    /// Parse a free-text medication into a canonical record
    ParseMedication {
        /// e.g. "Aspirin (Aspilets) 80mg"
        text: String,
    },
    /// List the built-in note templates
    Templates,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    medscribe_lib::init_tracing();
    let cli = Cli::parse();
    tracing::debug!("{} v{}", config::APP_NAME, config::APP_VERSION);

    match cli.command {
        Commands::Normalize {
            file,
            sections,
            format,
            id,
            markdown,
        } => {
            let structurer = match format {
                Some(format) => NoteStructurer::with_format(format),
                None => NoteStructurer::new(),
            };
            let template = sections.map(TemplateDescriptor::new);
            let result = structurer.structure_file(
                id.unwrap_or_else(Uuid::new_v4),
                &file,
                template.as_ref(),
            )?;
            if markdown {
                print!("{}", result.note.to_markdown());
            } else {
                println!("{}", serde_json::to_string_pretty(&result)?);
            }
        }
        Commands::ParseMedication { text } => {
            let parsed = parse_complex_medication_string(&text);
            let record = MedicationRecord {
                generic_name: parsed.generic_name,
                brand_name: parsed.brand_name,
                strength: parsed.strength,
                ..Default::default()
            };
            println!("{}", serde_json::to_string_pretty(&record)?);
        }
        Commands::Templates => {
            println!("{}", serde_json::to_string_pretty(&default_templates())?);
        }
    }

    Ok(())
}
