use vsg_assessment_core::{Catalog, QuestionKind};

pub fn run(json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let catalog = Catalog::week1();
    if json {
        println!("{}", serde_json::to_string_pretty(&catalog)?);
        return Ok(());
    }

    for (i, section) in catalog.sections().iter().enumerate() {
        println!("[{}] {}", i + 1, section.title);
        if section.is_informational() {
            println!("    (name entry only)");
        }
        for question in section.questions {
            let kind = match question.kind {
                QuestionKind::ShortText => "short",
                QuestionKind::LongText => "long",
            };
            println!("    {:<16} {:<5} {}", question.id, kind, question.label);
        }
    }
    Ok(())
}
