// Archivo: editor.rs
// Propósito: preguntas para construir un paso a partir de su tipo.
//
// Todas las lecturas pasan por `PromptSource`, así la cancelación de la
// terminal también corta el editor y las pruebas usan `ScriptedPrompt`.
use flow::{CalculusStep, CsvFileInputStep, CsvInputStep, DisplayStep, EndStep, FlowError, NumberInputStep,
           OperationKind, OutputStep, PromptSource, Step, StepKind, StepRef, TextFileInputStep, TextInputStep,
           TextStep, TitleStep};

/// Lee una línea y la devuelve sin espacios alrededor.
fn ask(prompt: &mut dyn PromptSource, msg: &str) -> flow::Result<String> {
    Ok(prompt.read_line(msg)?.trim().to_string())
}

/// Como `ask`, pero rechaza la respuesta vacía.
fn ask_required(prompt: &mut dyn PromptSource, msg: &str) -> flow::Result<String> {
    let answer = ask(prompt, msg)?;
    if answer.is_empty() {
        return Err(FlowError::Config(format!("valor obligatorio: {}", msg.trim_end_matches([':', ' ']))));
    }
    Ok(answer)
}

/// Número de paso 1-based escrito por el usuario (`3` o `#3`).
pub fn parse_step_number(raw: &str) -> flow::Result<StepRef> {
    let digits = raw.trim().trim_start_matches('#');
    digits.parse::<usize>()
          .ok()
          .and_then(StepRef::from_number)
          .ok_or_else(|| FlowError::Config(format!("número de paso inválido: '{}'", raw.trim())))
}

/// Lista de números de paso separados por comas o espacios.
pub fn parse_step_list(raw: &str) -> flow::Result<Vec<StepRef>> {
    raw.split(|c: char| c == ',' || c.is_whitespace())
       .filter(|t| !t.is_empty())
       .map(parse_step_number)
       .collect()
}

/// Tipo de paso elegido por posición en el catálogo (1..=11) o por nombre.
pub fn parse_kind(raw: &str) -> flow::Result<StepKind> {
    let raw = raw.trim();
    if let Ok(n) = raw.parse::<usize>() {
        return n.checked_sub(1)
                .and_then(|i| StepKind::ALL.get(i).copied())
                .ok_or_else(|| FlowError::Config(format!("no hay tipo de paso {}", n)));
    }
    raw.parse::<StepKind>().map_err(FlowError::Config)
}

/// Pregunta los parámetros de un paso de tipo `kind` y lo construye. Las
/// referencias se validan después, al añadirlo al flujo.
pub fn build_step(kind: StepKind, prompt: &mut dyn PromptSource) -> flow::Result<Step> {
    let step: Step = match kind {
        StepKind::Title => {
            let title = ask_required(prompt, "Title: ")?;
            let subtitle = ask(prompt, "Subtitle: ")?;
            TitleStep::new(title, subtitle).into()
        }
        StepKind::Text => {
            let title = ask_required(prompt, "Title: ")?;
            let copy = ask(prompt, "Copy: ")?;
            TextStep::new(title, copy).into()
        }
        StepKind::TextInput => TextInputStep::new(ask(prompt, "Description: ")?).into(),
        StepKind::NumberInput => NumberInputStep::new(ask(prompt, "Description: ")?).into(),
        StepKind::CsvInput => {
            let description = ask(prompt, "Description: ")?;
            let file = ask_required(prompt, "File name: ")?;
            CsvInputStep::new(description, file).into()
        }
        StepKind::Calculus => {
            let operation: OperationKind = ask(prompt, "Operation (add, subtract, multiply, divide, min, max): ")?.parse()?;
            let expression = ask_required(prompt, "Expression (e.g. #1 + #2 + 3): ")?;
            CalculusStep::parse(&expression, operation)?.into()
        }
        StepKind::Display => DisplayStep::new(parse_step_number(&ask(prompt, "Step to display: ")?)?).into(),
        StepKind::TextFileInput => {
            let description = ask(prompt, "Description: ")?;
            let file = ask_required(prompt, "File name: ")?;
            TextFileInputStep::new(description, file).into()
        }
        StepKind::CsvFileInput => {
            let description = ask(prompt, "Description: ")?;
            let file = ask_required(prompt, "File name: ")?;
            CsvFileInputStep::new(description, file).into()
        }
        StepKind::Output => {
            let file = ask_required(prompt, "File name: ")?;
            let title = ask(prompt, "Title: ")?;
            let description = ask(prompt, "Description: ")?;
            let sources = parse_step_list(&ask(prompt, "Steps to include (e.g. 1, 3): ")?)?;
            OutputStep::new(file, title, description, sources).into()
        }
        StepKind::End => EndStep.into(),
    };
    Ok(step)
}

#[cfg(test)]
mod tests {
    use super::*;
    use flow::stubs::{FixedClock, ScriptedPrompt};
    use flow::Flow;

    #[test]
    fn kind_by_position_or_name() {
        assert_eq!(parse_kind("1").unwrap(), StepKind::Title);
        assert_eq!(parse_kind("11").unwrap(), StepKind::End);
        assert_eq!(parse_kind("csv file input").unwrap(), StepKind::CsvFileInput);
        assert!(matches!(parse_kind("0"), Err(FlowError::Config(_))));
        assert!(matches!(parse_kind("12"), Err(FlowError::Config(_))));
        assert!(matches!(parse_kind("banana"), Err(FlowError::Config(_))));
    }

    #[test]
    fn step_numbers_are_one_based() {
        assert_eq!(parse_step_number("#3").unwrap(), StepRef(2));
        assert_eq!(parse_step_list("1, 3 4").unwrap(), vec![StepRef(0), StepRef(2), StepRef(3)]);
        assert!(parse_step_number("0").is_err());
        assert!(parse_step_list("1,x").is_err());
    }

    #[test]
    fn builds_a_calculus_step_that_the_flow_accepts() {
        let mut flow = Flow::create("editor", &FixedClock::epoch());
        let mut prompt = ScriptedPrompt::new(["a", "b"]);
        flow.add_step(build_step(StepKind::NumberInput, &mut prompt).unwrap()).unwrap();
        flow.add_step(build_step(StepKind::NumberInput, &mut prompt).unwrap()).unwrap();

        let mut prompt = ScriptedPrompt::new(["add", "#1 + #2"]);
        let calc = build_step(StepKind::Calculus, &mut prompt).unwrap();
        assert_eq!(calc.kind(), StepKind::Calculus);
        assert!(flow.add_step(calc).is_ok());
        assert_eq!(flow.steps().len(), 3);
    }

    #[test]
    fn unsupported_operation_is_reported() {
        let mut prompt = ScriptedPrompt::new(["pow", "1 2"]);
        assert!(matches!(build_step(StepKind::Calculus, &mut prompt), Err(FlowError::Arithmetic(_))));
    }

    #[test]
    fn missing_required_field_is_a_config_error() {
        let mut prompt = ScriptedPrompt::new(["", ""]);
        assert!(matches!(build_step(StepKind::Title, &mut prompt), Err(FlowError::Config(_))));
    }

    #[test]
    fn output_sources_are_read_as_a_list() {
        let mut prompt = ScriptedPrompt::new(["out.txt", "T", "D", "1 2"]);
        let step = build_step(StepKind::Output, &mut prompt).unwrap();
        assert_eq!(step.kind(), StepKind::Output);
        assert_eq!(step.references().len(), 2);
    }
}
