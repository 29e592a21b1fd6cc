pub mod ffmpeg_reader;
