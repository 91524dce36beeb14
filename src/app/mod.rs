// Application layer: end-to-end pipelines wired from config, core and adapters.

pub mod pipelines;
