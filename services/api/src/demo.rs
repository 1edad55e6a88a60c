use crate::infra::{pending_image_from_path, FsImageReader, InMemoryApplicationStore};
use clap::Args;
use scholarship_intake::applications::domain::FieldValue;
use scholarship_intake::applications::{
    FormSchema, FormSession, ScholarshipApplicationService, ScoringConfig, SubmissionError,
};
use scholarship_intake::config::AppConfig;
use scholarship_intake::error::AppError;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Image file to attach to the sample application (repeatable)
    #[arg(long = "image")]
    pub(crate) images: Vec<PathBuf>,
    /// Override the sample applicant's GPA
    #[arg(long)]
    pub(crate) gpa: Option<String>,
    /// Leave the agreement unchecked to demonstrate a validation failure
    #[arg(long)]
    pub(crate) decline_agreement: bool,
}

pub(crate) async fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let store = Arc::new(InMemoryApplicationStore::default());
    let service = ScholarshipApplicationService::new(store.clone(), ScoringConfig::default())
        .with_collection(config.store.collection.clone());

    let mut session = sample_session();
    if let Some(gpa) = args.gpa {
        session.set_value("gpa", FieldValue::Number(gpa));
    }
    if args.decline_agreement {
        session.set_value("agreement", FieldValue::Boolean(false));
    }

    println!("Scholarship intake demo");
    println!("  Collection: {}", service.collection());

    let mut uploads = Vec::with_capacity(args.images.len());
    for path in &args.images {
        match pending_image_from_path(path).await {
            Ok(pending) => uploads.push(pending),
            Err(err) => println!("  Skipping {}: {}", path.display(), err),
        }
    }
    let requested = uploads.len();
    let attached = session.images.attach(&FsImageReader, uploads).await;
    println!("  Images attached: {attached} of {requested}");
    for (index, image) in session.images.iter().enumerate() {
        println!("    [{index}] {} ({} bytes)", image.name, image.size);
    }

    let preview = service.preview(&session.collect_record());
    println!("  Score preview: {} ({})", preview.total, preview.tier.label());
    for component in &preview.components {
        println!(
            "    {:<20} {:>5.1}  {}",
            format!("{:?}", component.factor),
            component.points,
            component.notes
        );
    }

    match service.submit(&mut session).await {
        Ok(receipt) => {
            println!("  Stored as {} at {}", receipt.id.0, receipt.submitted_at);
            println!("  Score: {}/100", receipt.score);
            println!("  {}", receipt.message);
            if let Some((_, document)) = store.get(&receipt.id) {
                match serde_json::to_string_pretty(&document) {
                    Ok(json) => println!("  Stored document:\n{}", json),
                    Err(err) => println!("  Stored document unavailable: {}", err),
                }
            }
        }
        Err(SubmissionError::Validation(error)) => {
            println!("  Submission rejected at '{}': {}", error.field, error.message);
        }
        Err(err) => return Err(err.into()),
    }

    Ok(())
}

fn sample_session() -> FormSession {
    let mut session = FormSchema::default().blank_session();
    let answers = [
        ("fullName", FieldValue::Text("Nguyễn Văn An".to_string())),
        ("studentId", FieldValue::Text("SE123456".to_string())),
        ("email", FieldValue::Email("an.nguyen@example.edu.vn".to_string())),
        ("phone", FieldValue::Phone("0912345678".to_string())),
        ("faculty", FieldValue::Text("Software Engineering".to_string())),
        ("gpa", FieldValue::Number("3.6".to_string())),
        ("rank", FieldValue::SingleChoice(Some("excellent".to_string()))),
        ("income", FieldValue::Number("2500000".to_string())),
        (
            "situation",
            FieldValue::MultiChoice(
                ["rural_area", "single_parent"]
                    .into_iter()
                    .map(str::to_string)
                    .collect(),
            ),
        ),
        (
            "motivation",
            FieldValue::Text("Tuition support so I can keep tutoring younger students.".to_string()),
        ),
        ("agreement", FieldValue::Boolean(true)),
    ];
    for (name, value) in answers {
        session.set_value(name, value);
    }
    session
        .achievements
        .set(0, "Giải nhất Olympic Tin học sinh viên 2024");
    session.achievements.add("ICPC regional finalist");
    session.achievements.add("Dean's list 2023");
    session
        .evidences
        .set(0, "https://drive.google.com/file/d/olympiad");
    session.evidences.add("https://example.edu.vn/icpc/2024");
    session
}
