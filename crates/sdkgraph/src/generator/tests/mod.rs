mod partitioning;
mod support;
