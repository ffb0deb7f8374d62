/// The fixed multithreading pitfall taxonomy.
///
/// Nine categories, P1 through P9, each with a label, a descriptive paragraph used as
/// the baseline reference document for its prototype, and a handful of high-precision
/// seed patterns. The taxonomy is closed configuration: it is compiled once when the
/// analyzer is built and never inferred from data or mutated.
use regex::RegexSet;
use serde::Serialize;

use crate::error::CoreError;

/// Static definition of one category before its seed patterns are compiled.
struct CategoryDef {
    code: &'static str,
    label: &'static str,
    description: &'static str,
    seeds: &'static [&'static str],
}

const CATEGORY_DEFS: &[CategoryDef] = &[
    CategoryDef {
        code: "P1",
        label: "Race Condition",
        description: "Race condition: several threads read and write shared mutable state \
            without proper coordination, so the result depends on thread interleaving. \
            Typical symptoms are lost updates on a shared counter, non-atomic check then \
            act sequences, inconsistent or wrong results that only appear under load, \
            and data races on fields accessed by concurrent threads.",
        seeds: &[
            r"\brace[\s-]+conditions?\b",
            r"\bdata[\s-]+races?\b",
            r"\bnon[\s-]?atomic\b",
            r"\blost\s+updates?\b",
            r"\bcheck[\s-]+then[\s-]+act\b",
        ],
    },
    CategoryDef {
        code: "P2",
        label: "Deadlock",
        description: "Deadlock: two or more threads wait forever for locks held by each \
            other. The application hangs or freezes, a thread dump shows threads blocked \
            on monitors, typically caused by acquiring nested locks in inconsistent lock \
            ordering, creating a circular wait.",
        seeds: &[
            r"\bdeadlock",
            r"\bthread\.state\s*:\s*blocked\b",
            r"\bcircular\s+wait",
            r"\block\s+ordering\b",
        ],
    },
    CategoryDef {
        code: "P3",
        label: "Memory Visibility",
        description: "Memory visibility: a write made by one thread is never seen, or is \
            seen late, by another thread because there is no happens-before relationship. \
            A flag or field without volatile keeps a stale value, a loop never stops, or \
            an object is observed partially constructed under the memory model.",
        seeds: &[
            r"\bvolatile\b",
            r"\bhappens[\s-]+before\b",
            r"\bmemory\s+visibility\b",
            r"\bvisibility\s+(issue|problem)s?\b",
            r"\bstale\s+(value|data|read)s?\b",
        ],
    },
    CategoryDef {
        code: "P4",
        label: "Synchronization Misuse",
        description: "Synchronization misuse: locking is applied incorrectly, for example \
            synchronizing on the wrong object or on a new instance each time, calling \
            wait or unlock without owning the monitor and getting an illegal monitor state \
            exception, broken double checked locking, or a synchronized block that does \
            not cover every access to the shared state.",
        seeds: &[
            r"\billegalmonitorstateexception\b",
            r"\bdouble[\s-]+checked\s+locking\b",
            r"\bsynchroniz(e|ed|ing)\s+on\s+(a\s+|the\s+)?(string|boolean|integer|wrong)\b",
            r"\bnested\s+synchronized\b",
            r"\billegal\s+monitor\s+state\b",
        ],
    },
    CategoryDef {
        code: "P5",
        label: "Unsafe Collections",
        description: "Unsafe collections: a non thread safe collection such as an \
            arraylist, hashmap or hashset is shared between threads and modified \
            concurrently, leading to concurrent modification exception during iteration, \
            corrupted entries, infinite loops or missing elements instead of using a \
            concurrent collection.",
        seeds: &[
            r"\bconcurrentmodificationexception\b",
            r"\b(arraylist|hashmap|hashset|linkedlist)\s+(is\s+)?not\s+thread[\s-]?safe\b",
            r"\bcollections\.synchronized(list|map|set)\b",
            r"\bconcurrent\s+modification\b",
            r"\bcopyonwritearraylist\b",
        ],
    },
    CategoryDef {
        code: "P6",
        label: "Thread Pool Misconfiguration",
        description: "Thread pool misconfiguration: an executor service or thread pool \
            executor is sized or configured badly, so tasks are rejected, the queue grows \
            without bound, the pool is exhausted or starved, tasks never run, or the \
            executor is never shut down and keeps the application alive.",
        seeds: &[
            r"\brejectedexecutionexception\b",
            r"\bthreadpoolexecutor\b",
            r"\bthread[\s-]*pool\s+(size|sizing|exhaust\w*|starvation)\b",
            r"\bpool\s+exhaustion\b",
            r"\bcore\s*pool\s*size\b",
        ],
    },
    CategoryDef {
        code: "P7",
        label: "Wait/Notify Misuse",
        description: "Wait and notify misuse: threads coordinate with wait, notify or \
            notifyall, or with condition variables, but a signal is missed, a waiting \
            thread is never woken, a spurious wakeup is not handled because the condition \
            is not checked in a loop, or notify wakes the wrong waiter.",
        seeds: &[
            r"\bwait\s*/\s*notify",
            r"\bnotify\s*all\b",
            r"\bspurious\s+wake[\s-]?ups?\b",
            r"\bmissed\s+(signal|notification)s?\b",
            r"\bcondition\s+variables?\b",
        ],
    },
    CategoryDef {
        code: "P8",
        label: "Unexpected Thread Termination",
        description: "Unexpected thread termination: a worker thread dies or stops \
            silently because an uncaught exception escapes its run method, an exception \
            is swallowed by the executor and the task future is never inspected, or the \
            thread is stopped or interrupted and exits while work is still pending.",
        seeds: &[
            r"\buncaught\s*exception\s*handler\b",
            r"\bthread\s+(silently\s+)?(dies|died|terminates|terminated)\b",
            r"\bswallow(s|ed)?\s+(the\s+)?exceptions?\b",
            r"\bthread\.stop\b",
        ],
    },
    CategoryDef {
        code: "P9",
        label: "Performance Bottlenecks",
        description: "Performance bottlenecks: a multithreaded program runs slower than \
            expected or does not scale because of lock contention, excessive context \
            switching, too many threads, false sharing or coarse grained locking that \
            serializes the work and limits throughput and scalability.",
        seeds: &[
            r"\block\s+contention\b",
            r"\bcontext\s+switch(es|ing)?\b",
            r"\bbottlenecks?\b",
            r"\bscalab(le|ility)\b",
            r"\bfalse\s+sharing\b",
        ],
    },
];

/// One compiled taxonomy category.
#[derive(Debug, Clone)]
pub struct PitfallCategory {
    pub code: &'static str,
    pub label: &'static str,
    pub description: &'static str,
    seeds: RegexSet,
}

impl PitfallCategory {
    /// True when any seed pattern matches the text (case-insensitive).
    pub fn matches_seed(&self, text: &str) -> bool {
        self.seeds.is_match(text)
    }

    pub fn seed_count(&self) -> usize {
        self.seeds.len()
    }

    pub fn info(&self) -> CategoryInfo {
        CategoryInfo {
            code: self.code.to_string(),
            label: self.label.to_string(),
            description: self.description.to_string(),
        }
    }
}

/// Serializable summary of a category.
#[derive(Debug, Clone, PartialEq, Serialize, schemars::JsonSchema)]
pub struct CategoryInfo {
    pub code: String,
    pub label: String,
    pub description: String,
}

/// The ordered, immutable list of categories. Order (P1..P9) is the tie-break order
/// used by the classifier.
#[derive(Debug, Clone)]
pub struct Taxonomy {
    categories: Vec<PitfallCategory>,
}

impl Taxonomy {
    pub fn builtin() -> Result<Self, CoreError> {
        let categories = CATEGORY_DEFS
            .iter()
            .map(|def| {
                let seeds = RegexSet::new(def.seeds.iter().map(|p| format!("(?i){p}")))
                    .map_err(|e| CoreError::pattern(def.code, e))?;
                Ok(PitfallCategory {
                    code: def.code,
                    label: def.label,
                    description: def.description,
                    seeds,
                })
            })
            .collect::<Result<Vec<_>, CoreError>>()?;
        Ok(Self { categories })
    }

    pub fn categories(&self) -> &[PitfallCategory] {
        &self.categories
    }

    pub fn get(&self, code: &str) -> Option<&PitfallCategory> {
        self.categories
            .iter()
            .find(|c| c.code.eq_ignore_ascii_case(code))
    }

    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }
}
