//! Built-in collection used on first run and as the fallback for an
//! unreadable store.

use crate::models::Snippet;

fn tags(list: &[&str]) -> Vec<String> {
    list.iter().map(|t| t.to_string()).collect()
}

pub fn sample_snippets() -> Vec<Snippet> {
    vec![
        Snippet::new(
            "React useState Hook",
            "javascript",
            tags(&["react", "hooks", "state"]),
            "import { useState } from 'react';\n\nfunction Example() {\n  const [count, setCount] = useState(0);\n  \n  return (\n    <div>\n      <p>You clicked {count} times</p>\n      <button onClick={() => setCount(count + 1)}>\n        Click me\n      </button>\n    </div>\n  );\n}",
        ),
        Snippet::new(
            "Python List Comprehension",
            "python",
            tags(&["python", "list", "comprehension"]),
            "# Basic list comprehension\nsquares = [x**2 for x in range(10)]\n\n# With condition\neven_squares = [x**2 for x in range(10) if x % 2 == 0]\n\n# Nested comprehension\nmatrix = [[i+j for j in range(3)] for i in range(3)]",
        ),
        Snippet::new(
            "CSS Flexbox Center",
            "css",
            tags(&["css", "flexbox", "layout"]),
            ".container {\n  display: flex;\n  justify-content: center;\n  align-items: center;\n  min-height: 100vh;\n}\n\n.item {\n  /* Your content here */\n}",
        ),
        Snippet::new(
            "PowerShell Get-Process",
            "powershell",
            tags(&["PS", "powershell", "process"]),
            "# Get all running processes\nGet-Process | Where-Object {$_.CPU -gt 10} | Sort-Object CPU -Descending\n\n# Get specific process by name\nGet-Process -Name 'notepad' -ErrorAction SilentlyContinue\n\n# Get process with custom properties\nGet-Process | Select-Object Name, Id, CPU, WorkingSet | Format-Table -AutoSize",
        ),
        Snippet::new(
            "Java Stream API Example",
            "java",
            tags(&["java", "stream", "collections"]),
            "import java.util.List;\nimport java.util.stream.Collectors;\n\n// Filter and map using streams\nList<String> names = List.of(\"Alice\", \"Bob\", \"Charlie\", \"David\");\nList<String> filteredNames = names.stream()\n    .filter(name -> name.length() > 4)\n    .map(String::toUpperCase)\n    .collect(Collectors.toList());\n\nSystem.out.println(filteredNames); // [ALICE, CHARLIE, DAVID]",
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn five_valid_samples_with_unique_ids() {
        let samples = sample_snippets();
        assert_eq!(samples.len(), 5);
        assert!(samples.iter().all(|s| s.validate().is_ok()));

        let ids: HashSet<_> = samples.iter().map(|s| s.id.clone()).collect();
        assert_eq!(ids.len(), 5);
    }

    #[test]
    fn samples_are_not_duplicates_of_each_other() {
        let samples = sample_snippets();
        for s in &samples {
            assert!(crate::duplicates::find_duplicates(s, &samples).is_empty());
        }
    }
}
