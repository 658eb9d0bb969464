use std::io::{BufRead, Write};

use log::debug;

use crate::cookbook::Cookbook;
use crate::error::SousError;
use crate::markup::Ingredient;
use crate::recipe::Recipe;

/// Picks zero or more of a list of labelled choices.
///
/// Returned values are indices into `choices`.
pub trait Selector {
    fn select(&mut self, prompt: &str, choices: &[String]) -> Result<Vec<usize>, SousError>;
}

impl<F> Selector for F
where
    F: FnMut(&str, &[String]) -> Result<Vec<usize>, SousError>,
{
    fn select(&mut self, prompt: &str, choices: &[String]) -> Result<Vec<usize>, SousError> {
        self(prompt, choices)
    }
}

/// Lets the user pick recipes from the cookbook, then ingredients from
/// those recipes.
pub fn pick_ingredients(
    cookbook: &Cookbook,
    selector: &mut dyn Selector,
) -> Result<Vec<Ingredient>, SousError> {
    let recipe_labels: Vec<String> = cookbook
        .recipes()
        .iter()
        .map(recipe_label)
        .collect();
    let chosen = checked(
        selector.select("Which recipes are you making?", &recipe_labels)?,
        recipe_labels.len(),
    )?;

    let candidates: Vec<&Ingredient> = chosen
        .into_iter()
        .flat_map(|index| cookbook.recipes()[index].ingredients())
        .collect();
    let ingredient_labels: Vec<String> = candidates.iter().map(|i| i.to_string()).collect();
    let chosen = checked(
        selector.select("Which ingredients do you need?", &ingredient_labels)?,
        ingredient_labels.len(),
    )?;

    debug!("Picked {} of {} ingredient(s)", chosen.len(), candidates.len());
    Ok(chosen
        .into_iter()
        .map(|index| candidates[index].clone())
        .collect())
}

fn checked(indices: Vec<usize>, len: usize) -> Result<Vec<usize>, SousError> {
    match indices.iter().find(|&&index| index >= len) {
        Some(index) => Err(SousError::Selection(format!(
            "choice {} is out of range (there are {} choices)",
            index + 1,
            len
        ))),
        None => Ok(indices),
    }
}

/// Selector that lists numbered choices and reads the answer from a line of
/// input. Numbers may be separated by spaces or commas; an empty answer
/// selects everything.
pub struct PromptSelector<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> PromptSelector<R, W> {
    pub fn new(input: R, output: W) -> Self {
        PromptSelector { input, output }
    }
}

impl<R: BufRead, W: Write> Selector for PromptSelector<R, W> {
    fn select(&mut self, prompt: &str, choices: &[String]) -> Result<Vec<usize>, SousError> {
        let io_error = |e| SousError::io("<terminal>", e);

        writeln!(self.output, "{prompt}").map_err(io_error)?;
        for (index, choice) in choices.iter().enumerate() {
            writeln!(self.output, "  {:>2}) {}", index + 1, choice).map_err(io_error)?;
        }
        write!(self.output, "> ").map_err(io_error)?;
        self.output.flush().map_err(io_error)?;

        let mut answer = String::new();
        self.input.read_line(&mut answer).map_err(io_error)?;
        parse_answer(&answer, choices.len())
    }
}

fn parse_answer(answer: &str, len: usize) -> Result<Vec<usize>, SousError> {
    let answer = answer.trim();
    if answer.is_empty() {
        return Ok((0..len).collect());
    }

    let mut selected = Vec::new();
    for token in answer.split(|c: char| c == ',' || c.is_whitespace()) {
        if token.is_empty() {
            continue;
        }
        let number: usize = token
            .parse()
            .map_err(|_| SousError::Selection(format!("'{token}' is not a number")))?;
        if number == 0 || number > len {
            return Err(SousError::Selection(format!(
                "choice {number} is out of range (there are {len} choices)"
            )));
        }
        if !selected.contains(&(number - 1)) {
            selected.push(number - 1);
        }
    }

    Ok(selected)
}

/// Labels used for recipes in selection prompts.
pub fn recipe_label(recipe: &Recipe) -> String {
    match (recipe.name(), recipe.path()) {
        (Some(name), _) => name.to_string(),
        (None, Some(path)) => path.display().to_string(),
        (None, None) => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn cookbook() -> Cookbook {
        Cookbook::from_recipes(vec![
            Recipe::parse("# Soup\n{1}[onion]\n{2 cups}[stock]\n"),
            Recipe::parse("# Salad\n{1 head}[lettuce]\nDress with {1 tbsp}[olive oil].\n"),
        ])
    }

    #[test]
    fn test_pick_ingredients_with_closure() {
        let mut calls = Vec::new();
        let mut selector = |prompt: &str, choices: &[String]| {
            calls.push((prompt.to_string(), choices.to_vec()));
            Ok::<Vec<usize>, SousError>(if calls.len() == 1 { vec![1] } else { vec![1, 0] })
        };

        let picked = pick_ingredients(&cookbook(), &mut selector).unwrap();
        assert_eq!(
            picked,
            vec![
                Ingredient::new("olive oil").with_quantity("1 tbsp"),
                Ingredient::new("lettuce").with_quantity("1 head"),
            ]
        );
        assert_eq!(calls[0].1, vec!["Soup", "Salad"]);
        assert_eq!(calls[1].1, vec!["1 head lettuce", "1 tbsp olive oil"]);
    }

    #[test]
    fn test_pick_ingredients_rejects_out_of_range() {
        let mut selector = |_: &str, _: &[String]| Ok::<Vec<usize>, SousError>(vec![5]);
        let result = pick_ingredients(&cookbook(), &mut selector);
        assert!(matches!(result, Err(SousError::Selection(_))));
    }

    #[test]
    fn test_prompt_selector() {
        let mut output = Vec::new();
        let mut selector = PromptSelector::new(Cursor::new("2, 1 2\n"), &mut output);
        let choices = vec!["a".to_string(), "b".to_string()];

        assert_eq!(selector.select("Pick:", &choices).unwrap(), vec![1, 0]);
        let shown = String::from_utf8(output).unwrap();
        assert!(shown.starts_with("Pick:\n   1) a\n   2) b\n> "));
    }

    #[test]
    fn test_parse_answer() {
        assert_eq!(parse_answer("\n", 3).unwrap(), vec![0, 1, 2]);
        assert_eq!(parse_answer("3 1", 3).unwrap(), vec![2, 0]);
        assert!(parse_answer("4", 3).is_err());
        assert!(parse_answer("0", 3).is_err());
        assert!(parse_answer("two", 3).is_err());
    }

    #[test]
    fn test_recipe_label() {
        assert_eq!(recipe_label(&Recipe::parse("# Stew")), "Stew");
        assert_eq!(recipe_label(&Recipe::parse("no header")), "");
    }
}
